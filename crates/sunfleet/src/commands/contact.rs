//! Contact command handlers.
//!
//! `submit` drives the same form state machine the TUI uses; nothing
//! leaves the machine.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use sunfleet_core::contact::{self, BUSINESS_HOURS, SERVICE_AREAS};
use sunfleet_core::{ContactForm, ContactRequest, ServiceType};

use crate::cli::{ContactArgs, ContactCommand, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct Receipt<'a> {
    status: String,
    name: &'a str,
    email: &'a str,
    service: Option<ServiceType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactInfo {
    phone: &'static str,
    phone_link: String,
    email: &'static str,
    email_link: String,
    service_areas: Vec<&'static str>,
    hours: Vec<Hours>,
}

#[derive(Debug, Serialize)]
struct Hours {
    days: &'static str,
    hours: &'static str,
}

fn info() -> ContactInfo {
    ContactInfo {
        phone: contact::PHONE,
        phone_link: contact::phone_link(),
        email: contact::EMAIL,
        email_link: contact::email_link(),
        service_areas: SERVICE_AREAS.to_vec(),
        hours: BUSINESS_HOURS
            .iter()
            .map(|&(days, hours)| Hours { days, hours })
            .collect(),
    }
}

fn info_detail(i: &ContactInfo) -> String {
    let mut lines = vec![
        format!("Phone:  {} ({})", i.phone, i.phone_link),
        format!("Email:  {} ({})", i.email, i.email_link),
        format!("Areas:  {}", i.service_areas.join(", ")),
        "Hours:".to_owned(),
    ];
    lines.extend(i.hours.iter().map(|h| format!("  {:<18} {}", h.days, h.hours)));
    lines.join("\n")
}

fn spinner(global: &GlobalOpts) -> ProgressBar {
    if global.quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Sending message...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub async fn handle(args: ContactArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ContactCommand::Submit {
            name,
            phone,
            email,
            message,
            service,
            delay_ms,
        } => {
            let service = service
                .as_deref()
                .map(|s| {
                    util::parse_flag::<ServiceType>(
                        "service",
                        s,
                        "local, medical, airport, long-distance, wheelchair, medicaid, other",
                    )
                })
                .transpose()?;

            let mut form = ContactForm::new();
            form.request = ContactRequest {
                name,
                phone,
                email,
                service,
                message,
            };

            let delay = delay_ms.map_or_else(|| cfg.contact.submit_delay(), Duration::from_millis);
            let pb = spinner(global);
            let result = form.submit(delay).await;
            pb.finish_and_clear();
            result?;

            let receipt = Receipt {
                status: form.phase().to_string().to_lowercase(),
                name: &form.request.name,
                email: &form.request.email,
                service: form.request.service,
            };
            let out = output::render_single(
                &global.output(),
                &receipt,
                |r| {
                    format!(
                        "✓ Message Sent!\nThank you for contacting Sunshine Rides, {}. \
                         We'll be in touch shortly.",
                        r.name
                    )
                },
                |r| r.status.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ContactCommand::Info => {
            let out = output::render_single(&global.output(), &info(), info_detail, |i| {
                format!("{}\n{}", i.phone, i.email)
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
