//! 档案 CLI 命令实现

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::live_demo::{enter_live_demo, Navigator};
use crate::profile::{FieldGroup, ProfileField, ProfilePatch, ProfileRecord};
use crate::store::ProfileStore;

/// 显示当前档案
pub fn show_profile(store: &ProfileStore, json: bool) -> Result<()> {
    let record = store.read();

    if json {
        let output =
            serde_json::to_string_pretty(record.as_ref()).context("Failed to serialize profile")?;
        println!("{}", output);
        return Ok(());
    }

    if record.is_blank() {
        println!("No profile data yet.");
        println!(
            "💡 Tip: Use {} or {} to fill it in.",
            "profile-store set name=...".cyan(),
            "profile-store demo".cyan()
        );
        return Ok(());
    }

    print_record(&record);
    println!(
        "\n  {}/{} fields filled",
        record.filled_count(),
        ProfileField::ALL.len()
    );

    Ok(())
}

fn print_record(record: &ProfileRecord) {
    for group in FieldGroup::ALL {
        println!("{}", format!("▸ {}", group.title()).cyan().bold());
        for field in group.fields() {
            let value = record.get(field);
            if value.is_empty() {
                println!("  {:24} {}", field.as_str(), "-".dimmed());
            } else {
                println!("  {:24} {}", field.as_str(), value.yellow());
            }
        }
        println!();
    }
}

/// 解析 `field=value` 形式的赋值
pub fn parse_assignment(input: &str) -> Result<(ProfileField, String)> {
    let (name, value) = input
        .split_once('=')
        .with_context(|| format!("Expected field=value, got: {}", input))?;

    let field: ProfileField = name.trim().parse()?;
    Ok((field, value.to_string()))
}

/// 部分更新档案
pub fn set_fields(store: &ProfileStore, assignments: &[String]) -> Result<()> {
    let patch = assignments
        .iter()
        .map(|a| parse_assignment(a))
        .collect::<Result<ProfilePatch>>()?;

    if patch.is_empty() {
        bail!("No fields given. Usage: profile-store set field=value ...");
    }

    store.update(patch.clone());

    for (field, value) in patch.iter() {
        println!("  {} {} = {}", "✓".green(), field.as_str(), value.yellow());
    }

    Ok(())
}

/// 清空档案
pub fn reset_profile(store: &ProfileStore) -> Result<()> {
    store.reset();
    println!("{} Profile reset", "✓".green());
    Ok(())
}

/// 控制台导航：把跳转打印出来
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn replace(&mut self, route: &str) {
        println!("→ {}", route.cyan());
    }
}

/// 加载演示档案
pub fn run_live_demo(store: &ProfileStore) -> Result<()> {
    enter_live_demo(store, &mut ConsoleNavigator);
    println!("{} Demo profile loaded for {}", "✓".green(), store.read().name.yellow());
    Ok(())
}

/// 列出所有字段
pub fn list_fields() -> Result<()> {
    for group in FieldGroup::ALL {
        println!("{}", group.title().cyan().bold());
        for field in group.fields() {
            println!("  {} {}", "•".green(), field.as_str());
        }
    }

    println!();
    println!("{} {} fields", "✓".green(), ProfileField::ALL.len());
    Ok(())
}
