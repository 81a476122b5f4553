mod auth;
mod available;
mod clock;
mod info;
mod setup;
mod status;

use anyhow::Result;
use chrono::NaiveDate;
use freee_hr::domain::ClockType;

use crate::{
    cli::Commands,
    config::{EmployeeScope, Settings},
    console::Console,
    error::KintaiError,
    store::DocumentStore,
};

/// Everything a command needs besides the console.
pub struct Context {
    pub settings: Settings,
    pub store: Box<dyn DocumentStore>,
    /// The local calendar day the command runs on.
    pub today: NaiveDate,
}

impl Context {
    pub fn new(settings: Settings, store: Box<dyn DocumentStore>, today: NaiveDate) -> Self {
        Self {
            settings,
            store,
            today,
        }
    }

    /// Company and employee ids resolved by `info`.
    fn employee_scope(&self) -> Result<EmployeeScope> {
        let scope = self
            .store
            .load_config()?
            .employee_scope()
            .ok_or(KintaiError::IdsNotResolved)?;
        Ok(scope)
    }
}

pub async fn run(command: Commands, ctx: &Context, console: &mut dyn Console) -> Result<()> {
    match command {
        Commands::Setup => setup::run(ctx, console),
        Commands::Auth => auth::run(ctx, console).await,
        Commands::Info => info::run(ctx, console).await,
        Commands::In => clock::run(ctx, console, ClockType::ClockIn).await,
        Commands::Out => clock::run(ctx, console, ClockType::ClockOut).await,
        Commands::BreakBegin => clock::run(ctx, console, ClockType::BreakBegin).await,
        Commands::BreakEnd => clock::run(ctx, console, ClockType::BreakEnd).await,
        Commands::Status { yesterday, date } => status::run(ctx, console, date, yesterday).await,
        Commands::Available => available::run(ctx, console).await,
    }
}
