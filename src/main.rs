// gobarber-agenda
// Prints today's agenda for the signed-in provider.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use gobarber_schedule::http_config::HttpConfig;
use gobarber_schedule::utils::logging::init_logging;
use gobarber_schedule::{Agenda, ApiClient, Appointment, Config, Dashboard, SessionStore};
use log::{error, info};

fn print_section(title: &str, appointments: &[Appointment]) {
    println!("{}", title);
    if appointments.is_empty() {
        println!("  Nenhum agendamento neste período");
    }
    for appointment in appointments {
        println!("  {}  {}", appointment.hour, appointment.user.name);
    }
}

fn print_agenda(dashboard: &Dashboard, agenda: &Agenda) {
    println!("Horários agendados");
    if dashboard.is_today_selected() {
        print!("Hoje | ");
    }
    println!(
        "{} | {}",
        dashboard.selected_date_caption(),
        dashboard.selected_weekday()
    );
    println!();

    if let Some(next) = &agenda.next {
        println!("Atendimento a seguir: {} às {}", next.user.name, next.hour);
        println!();
    }

    print_section("Manhã", &agenda.morning);
    print_section("Tarde", &agenda.afternoon);

    let unavailable = dashboard.unavailable_dates();
    println!();
    println!(
        "{} dia(s) indisponível(is) em {}",
        unavailable.len(),
        dashboard.current_month()
    );
}

async fn run() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let store = SessionStore::new(config.session_path.clone());

    let session = match store.load().context("Failed to read session")? {
        Some(session) => session,
        None => bail!("Not signed in (no session at {})", store.path().display()),
    };

    let api = ApiClient::new(&config, &HttpConfig::default())
        .context("Failed to build API client")?
        .with_session(&session);

    let provider_id = config
        .provider_id
        .clone()
        .unwrap_or_else(|| session.user.id.clone());

    let today = config.now_local().date_naive();
    let mut dashboard = Dashboard::new(today);
    dashboard
        .refresh(&api, &provider_id, config.timezone)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_safe_string()))
        .context("Failed to load the dashboard")?;

    info!("Welcome, {}", session.user.name);
    let agenda = dashboard.agenda(Utc::now());
    print_agenda(&dashboard, &agenda);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
