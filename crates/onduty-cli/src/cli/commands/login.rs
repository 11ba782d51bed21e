//! Headless login command handler.

use anyhow::Result;
use onduty_core::{Config, LoginMode};
use onduty_tui::{LoginReport, LoginRequest, Services};

pub struct LoginArgs {
    pub role: LoginMode,
    pub email: String,
    pub password: String,
    pub remember_me: bool,
    pub json: bool,
}

pub async fn run(config: &Config, args: LoginArgs) -> Result<()> {
    let request = LoginRequest {
        mode: args.role,
        email: args.email,
        password: args.password,
        remember_me: args.remember_me,
    };
    let report = onduty_tui::run_login(config, Services::from_config(config), request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.succeeded() {
        Ok(())
    } else {
        anyhow::bail!("Login failed")
    }
}

fn print_report(report: &LoginReport) {
    println!("Mode: {}", report.mode.display_name());
    if report.remember_me {
        println!("Remember me: on");
    }
    for (field, message) in report.field_errors.iter() {
        println!("{}: {message}", field.label());
    }
    if let Some(status) = &report.status {
        println!("{}", status.text);
    }
    if let Some(route) = report.route {
        println!("{route}");
    }
}
