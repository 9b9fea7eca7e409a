use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use rentdesk::LeaseError;
use rentdesk::config::ClientConfig;
use rentdesk::dispatcher::LeaseDispatcher;
use rentdesk::lifecycle::{Intent, eligible_intents};
use rentdesk::model::{
    ApartmentId, Lease, LeaseId, LeaseStatus, LeaseTerms, RentAmount, TenantId, format_date,
    parse_date,
};
use rentdesk::remote::{CommandReceipt, EnvToken, RemoteClient};

use crate::LeaseCommands;

const ENV_TOKEN: &str = "RENTDESK_TOKEN";

#[derive(Serialize)]
struct LeaseRow {
    id: i64,
    tenant: Option<String>,
    apartment: Option<String>,
    start: String,
    end: String,
    rent: String,
    status: LeaseStatus,
    actions: Vec<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    document_url: Option<String>,
}

impl From<&Lease> for LeaseRow {
    fn from(l: &Lease) -> Self {
        Self {
            id: l.id.get(),
            tenant: l
                .tenant_name
                .clone()
                .or_else(|| l.tenant_id.map(|t| format!("#{}", t))),
            apartment: l
                .apartment_label
                .clone()
                .or_else(|| l.apartment_id.map(|a| format!("#{}", a))),
            start: format_date(l.start),
            end: format_date(l.end),
            rent: l.rent.as_major(),
            status: l.status,
            actions: eligible_intents(l.status).into_iter().collect(),
            document_url: l.document_url.clone(),
        }
    }
}

fn explain(err: LeaseError) -> anyhow::Error {
    if err.is_signing_setup_required() {
        return anyhow::anyhow!(
            "document signing is not configured on the lease service ({}); \
             finish the signing provider setup in the admin settings and retry",
            err
        );
    }
    anyhow::Error::new(err)
}

fn parse_day(raw: &str, what: &str) -> Result<time::Date> {
    parse_date(raw).with_context(|| format!("invalid {} date {:?} (expected YYYY-MM-DD)", what, raw))
}

fn print_receipt(intent: Intent, lease: Option<&Lease>, receipt: &CommandReceipt) {
    match lease.map(|l| l.id.get()).or(receipt.lease_id) {
        Some(id) => println!("{}: lease {} accepted", intent, id),
        None => println!("{}: accepted", intent),
    }
    if let Some(status) = &receipt.status {
        println!("status: {}", status);
    } else if let Some(next) = lease.and_then(|l| l.status.after(intent)) {
        println!("expected status: {}", next);
    }
    if let Some(url) = &receipt.sign_url {
        println!("sign url: {}", url);
    }
}

async fn find_lease(
    dispatcher: &LeaseDispatcher<RemoteClient>,
    lease_id: LeaseId,
) -> Result<Lease> {
    let snapshot = dispatcher.leases().await.map_err(explain)?;
    snapshot
        .get(lease_id)
        .cloned()
        .with_context(|| format!("lease not found: {}", lease_id))
}

pub(crate) async fn handle_lease_command(
    config: Option<PathBuf>,
    command: LeaseCommands,
) -> Result<()> {
    let cwd = std::env::current_dir().context("read current directory")?;
    let cfg = ClientConfig::load(config.as_deref(), &cwd).context("load config")?;
    let client = RemoteClient::new(&cfg, Arc::new(EnvToken::new(ENV_TOKEN)))?;
    let client = Arc::new(client);
    let mut dispatcher = LeaseDispatcher::new(Arc::clone(&client));

    match command {
        LeaseCommands::List { status, json } => {
            let wanted = status
                .as_deref()
                .map(str::parse::<LeaseStatus>)
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let snapshot = dispatcher.leases().await.map_err(explain)?;
            let rows = snapshot
                .leases
                .iter()
                .filter(|l| wanted.is_none_or(|s| l.status == s))
                .map(LeaseRow::from)
                .collect::<Vec<_>>();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&rows).context("serialize leases json")?
                );
            } else if rows.is_empty() {
                println!("No leases");
            } else {
                for r in rows {
                    println!(
                        "{} {} {}..{} {} tenant={} apartment={}",
                        r.id,
                        r.status,
                        r.start,
                        r.end,
                        r.rent,
                        r.tenant.as_deref().unwrap_or("-"),
                        r.apartment.as_deref().unwrap_or("-"),
                    );
                }
            }
        }
        LeaseCommands::Filters { json } => {
            let snapshot = dispatcher.leases().await.map_err(explain)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&snapshot.filters)
                        .context("serialize filters json")?
                );
            } else {
                for f in &snapshot.filters {
                    println!("{}\t{}", f.value, f.text);
                }
            }
        }
        LeaseCommands::Send { lease_id } => {
            let lease = find_lease(&dispatcher, LeaseId(lease_id)).await?;
            let receipt = dispatcher.send(&lease).await.map_err(explain)?;
            print_receipt(Intent::Send, Some(&lease), &receipt);
        }
        LeaseCommands::Renew { lease_id } => {
            let lease = find_lease(&dispatcher, LeaseId(lease_id)).await?;
            let receipt = dispatcher.renew(&lease).await.map_err(explain)?;
            print_receipt(Intent::Renew, Some(&lease), &receipt);
        }
        LeaseCommands::Amend {
            lease_id,
            start,
            end,
            rent,
        } => {
            let lease = find_lease(&dispatcher, LeaseId(lease_id)).await?;
            let mut terms = lease.terms();
            if let Some(start) = start {
                terms.start = parse_day(&start, "start")?;
            }
            if let Some(end) = end {
                terms.end = parse_day(&end, "end")?;
            }
            if let Some(rent) = rent {
                terms.rent = RentAmount(rent);
            }
            let receipt = dispatcher
                .amend(&lease, Some(terms))
                .await
                .map_err(explain)?;
            print_receipt(Intent::Amend, Some(&lease), &receipt);
        }
        LeaseCommands::Terminate { lease_id } => {
            // Unknown ids are left to the dispatcher's precondition check.
            let snapshot = dispatcher.leases().await.map_err(explain)?;
            let lease = snapshot.get(LeaseId(lease_id)).cloned();
            let receipt = dispatcher
                .terminate(LeaseId(lease_id))
                .await
                .map_err(explain)?;
            print_receipt(Intent::Terminate, lease.as_ref(), &receipt);
        }
        LeaseCommands::Add {
            tenant_id,
            apartment_id,
            rent,
            start,
            end,
        } => {
            let draft = dispatcher.begin_add(
                TenantId(tenant_id),
                ApartmentId(apartment_id),
                RentAmount(rent),
            )?;
            let terms = LeaseTerms {
                start: match start {
                    Some(s) => parse_day(&s, "start")?,
                    None => draft.terms.start,
                },
                end: match end {
                    Some(e) => parse_day(&e, "end")?,
                    None => draft.terms.end,
                },
                rent: draft.terms.rent,
            };
            if let Some(current) = dispatcher.terms_mut() {
                *current = terms;
            }
            let receipt = dispatcher.submit().await.map_err(explain)?;
            print_receipt(Intent::Add, None, &receipt);
        }
        LeaseCommands::DocumentUrl { lease_id } => {
            let url = client
                .document_url(LeaseId(lease_id))
                .await
                .map_err(explain)?;
            println!("{}", url);
        }
        LeaseCommands::NotifyExpiring { json } => {
            let report = client.notify_expiring().await.map_err(explain)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("serialize report json")?
                );
            } else {
                println!("{} lease(s) expiring soon", report.expiring_leases_count);
                for l in &report.expiring_leases {
                    println!(
                        "{} {} ({} days) tenant={} apartment={}",
                        l.lease_id,
                        l.expiration_date,
                        l.days_remaining,
                        l.tenant_name,
                        l.apartment.as_deref().unwrap_or("-"),
                    );
                }
            }
        }
    }

    Ok(())
}
