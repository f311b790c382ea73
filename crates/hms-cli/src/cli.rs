use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "hms")]
#[command(about = "Hospital management console for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides profile and client config)
    #[arg(short, long, global = true, env = "HMS_URL")]
    pub server: Option<String>,

    /// Config profile name
    #[arg(short, long, global = true, env = "HMS_PROFILE", default_value = "default")]
    pub profile: String,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Client config file (timeouts, success messages, log level)
    #[arg(long, global = true, env = "HMS_CONFIG")]
    pub config: Option<String>,
}

#[derive(Clone, Copy, ValueEnum, Default, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store an issued session token for this profile
    Login(LoginArgs),
    /// Remove the stored session token
    Logout,
    /// Show profile, server and session state
    Whoami,
    /// Manage CLI configuration
    Config(ConfigArgs),
    /// Patient records
    Patient(RecordArgs),
    /// Doctors
    Doctor(RecordArgs),
    /// Departments
    Department(RecordArgs),
    /// Wards
    Ward(RecordArgs),
    /// Outpatient visits and prescriptions
    Visit(VisitArgs),
    /// In-patient admissions
    Admission(AdmissionArgs),
    /// Statistics
    Report(ReportArgs),
    /// Resolve a console path to its view and title
    Route(RouteArgs),
}

#[derive(clap::Args)]
pub struct LoginArgs {
    /// Bearer token issued by the backend
    #[arg(long)]
    pub token: String,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Filters as key=value pairs (e.g. surname=张 deptId=3)
    pub params: Vec<String>,
    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,
    /// Rows per page
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(clap::Args)]
pub struct IdArgs {
    pub id: String,
}

#[derive(clap::Args)]
pub struct BodyArgs {
    /// Path to JSON file (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct IdBodyArgs {
    pub id: String,
    /// Path to JSON file (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct RecordArgs {
    #[command(subcommand)]
    pub command: RecordCommands,
}

#[derive(Subcommand)]
pub enum RecordCommands {
    /// List one page
    List(ListArgs),
    /// Show one record
    Get(IdArgs),
    /// Create a record from JSON
    Create(BodyArgs),
    /// Replace a record from JSON
    Update(IdBodyArgs),
    /// Delete a record
    Delete(IdArgs),
}

#[derive(clap::Args)]
pub struct VisitArgs {
    #[command(subcommand)]
    pub command: VisitCommands,
}

#[derive(Subcommand)]
pub enum VisitCommands {
    List(ListArgs),
    Get(IdArgs),
    Create(BodyArgs),
    Delete(IdArgs),
    /// Replace the prescription of a visit
    Prescription(IdBodyArgs),
}

#[derive(clap::Args)]
pub struct AdmissionArgs {
    #[command(subcommand)]
    pub command: AdmissionCommands,
}

#[derive(Subcommand)]
pub enum AdmissionCommands {
    /// Patients currently admitted
    Active(ListArgs),
    /// Admit a patient
    Admit(BodyArgs),
    /// Discharge an admission (body e.g. {"DischargeDate": "2024-05-01"})
    Discharge(IdBodyArgs),
}

#[derive(clap::Args, Default)]
pub struct WindowArgs {
    /// Start date, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,
    /// End date, YYYY-MM-DD
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(clap::Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommands,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Per-department statistics
    Department {
        id: String,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Revenue over a date range
    Revenue {
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Workload of one doctor
    Doctor {
        id: String,
        #[command(flatten)]
        window: WindowArgs,
    },
}

#[derive(clap::Args)]
pub struct RouteArgs {
    /// Console path, e.g. /patients/edit/9
    pub path: String,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Key to set (server, format)
    pub key: String,
    /// Value
    pub value: String,
}
