use anyhow::Result;

use super::Context;
use crate::{console::Console, labels, token};

pub async fn run(ctx: &Context, console: &mut dyn Console) -> Result<()> {
    let scope = ctx.employee_scope()?;
    let client = token::authorized_client(ctx).await?;

    let types = client
        .available_types(scope.employee_id, scope.company_id, ctx.today)
        .await?;

    console.print("=== 現在打刻可能な種別 ===\n");
    if types.is_empty() {
        console.print("打刻可能な種別がありません。");
        return Ok(());
    }

    for clock_type in &types {
        console.print(&format!("  - {}", labels::available_label(clock_type)));
    }

    Ok(())
}
