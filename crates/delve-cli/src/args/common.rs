use clap::Args;

#[derive(Debug, Clone, Default, Args)]
pub struct ConfirmArgs {
    #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
    pub yes: bool,
}
