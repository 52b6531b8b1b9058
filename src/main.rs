use std::env;
use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::error::EngineResult;
use payroll_engine::store::{AttendanceStore, EmployeeStore};

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_HOST_ADDRESS: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    let subscriber = Registry::default().with(
        fmt::layer()
            .with_line_number(true)
            .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    );
    tracing::subscriber::set_global_default(subscriber).expect("Unable to install tracing subscriber");

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let data_dir = PathBuf::from(env::var("PAYROLL_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()));
    let host_address = env::var("HOST_ADDRESS").unwrap_or_else(|_| DEFAULT_HOST_ADDRESS.to_string());

    let config = ConfigLoader::load(&config_dir).expect("Unable to load payroll configuration");
    let state = load_state(config, &data_dir).expect("Unable to load payroll data");

    let listener = tokio::net::TcpListener::bind(&host_address)
        .await
        .expect("Unable to bind host address");
    info!(address = %host_address, config_dir = %config_dir, "Payroll engine listening");

    axum::serve(listener, create_router(state))
        .await
        .expect("Server error");
}

/// Loads both stores from `data_dir`, starting empty where a file is missing.
fn load_state(config: ConfigLoader, data_dir: &Path) -> EngineResult<AppState> {
    let employees_file = data_dir.join("employees.json");
    let attendance_file = data_dir.join("attendance.json");

    let employees = if employees_file.exists() {
        EmployeeStore::load_json(&employees_file)?
    } else {
        EmployeeStore::new()
    };
    let attendance = if attendance_file.exists() {
        AttendanceStore::load_json(&attendance_file)?
    } else {
        AttendanceStore::new()
    };
    info!(
        employees = employees.len(),
        attendance_records = attendance.len(),
        data_dir = %data_dir.display(),
        "Loaded payroll data"
    );

    Ok(AppState::new(config, employees, attendance).with_attendance_file(attendance_file))
}
