use clap::Args;

#[derive(Args)]
pub struct LogsArgs {
    #[arg(long, help = "Only events of this type, e.g. sso or authentication")]
    pub event_type: Option<String>,
    #[arg(long, default_value_t = 100)]
    pub size: u32,
    #[arg(long, help = "Only events at or after this time, epoch milliseconds")]
    pub from: Option<i64>,
    #[arg(short, long, help = "Keep polling for new events")]
    pub follow: bool,
}
