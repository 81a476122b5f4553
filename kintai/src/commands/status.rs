use anyhow::Result;
use chrono::NaiveDate;
use freee_hr::domain::DateRange;

use super::Context;
use crate::{console::Console, labels, time_utils, token};

pub async fn run(
    ctx: &Context,
    console: &mut dyn Console,
    date: Option<NaiveDate>,
    yesterday: bool,
) -> Result<()> {
    let scope = ctx.employee_scope()?;
    let client = token::authorized_client(ctx).await?;

    let target = time_utils::target_date(ctx.today, date, yesterday);
    let clocks = client
        .time_clocks(
            scope.employee_id,
            scope.company_id,
            DateRange::single_day(target),
        )
        .await?;

    if clocks.is_empty() {
        console.print(&format!("{} の打刻記録がありません。", target));
        return Ok(());
    }

    console.print(&format!("=== {} の打刻状況 ===\n", target));
    for clock in &clocks {
        console.print(&format!(
            "  {}: {}",
            labels::clock_label(&clock.clock_type),
            clock
                .datetime
                .as_deref()
                .map(time_utils::format_clock_time)
                .unwrap_or_default()
        ));
    }

    Ok(())
}
