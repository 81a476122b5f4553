use anyhow::Result;

use super::Context;
use crate::{console::Console, error::KintaiError, token};

pub async fn run(ctx: &Context, console: &mut dyn Console) -> Result<()> {
    let client = token::authorized_client(ctx).await?;
    let mut config = ctx.store.load_config()?;

    console.print("=== 事業所・従業員情報の取得 ===\n");

    let companies = client.me().await?.companies;
    if companies.is_empty() {
        return Err(KintaiError::NoCompanies.into());
    }

    console.print("所属事業所一覧:");
    for (i, company) in companies.iter().enumerate() {
        console.print(&format!("  [{}] {} (ID: {})", i + 1, company.name, company.id));
    }

    let company = &companies[choose(console, "事業所を選択", companies.len())?];
    console.print(&format!("\n事業所ID: {}", company.id));

    let employees = client.employees(company.id).await?;
    if employees.is_empty() {
        return Err(KintaiError::NoEmployees.into());
    }

    console.print("\n従業員一覧:");
    for (i, employee) in employees.iter().enumerate() {
        console.print(&format!(
            "  [{}] {} (ID: {}) {}",
            i + 1,
            employee.display_name,
            employee.id,
            employee.email.as_deref().unwrap_or("")
        ));
    }

    let employee = &employees[choose(console, "自分を選択", employees.len())?];

    config.company_id = Some(company.id);
    config.employee_id = Some(employee.id);
    ctx.store.save_config(&config)?;

    console.print(&format!("\n従業員ID: {}", employee.id));
    console.print(&format!(
        "\n設定を保存しました: {}",
        ctx.store.config_location()
    ));
    console.print("\nこれで準備完了です！");
    console.print("  'in'     - 出勤打刻");
    console.print("  'out'    - 退勤打刻");
    console.print("  'status' - 打刻状況確認");

    Ok(())
}

/// Zero-based index of the chosen entry. A single entry is taken without
/// asking.
fn choose(console: &mut dyn Console, question: &str, len: usize) -> Result<usize> {
    if len == 1 {
        return Ok(0);
    }

    let answer = console.prompt(&format!("\n{} [1-{}]: ", question, len))?;
    Ok(parse_selection(&answer, len)?)
}

/// Parse a 1-based menu answer into a 0-based index.
pub fn parse_selection(input: &str, len: usize) -> Result<usize, KintaiError> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
        .ok_or_else(|| KintaiError::InvalidSelection {
            input: input.to_string(),
            max: len,
        })
}
