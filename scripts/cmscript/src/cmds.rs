pub mod gen_schema;
pub mod report;

// -----------------------------------------------------------------------------
// Cmd
// -----------------------------------------------------------------------------
pub trait Cmd {
    fn run(&self) -> anyhow::Result<()>;
}

// -----------------------------------------------------------------------------
// Commands
// -----------------------------------------------------------------------------
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Coverage and validation of an employment history section
    Employment(report::EmploymentArgs),

    /// Coverage and validation of an address history section
    Address(report::AddressArgs),

    /// Write JSON schemas of the form and report types
    Schema(gen_schema::Args),
}

impl Cmd for Commands {
    fn run(&self) -> anyhow::Result<()> {
        match self {
            Commands::Employment(args) => args.run(),
            Commands::Address(args) => args.run(),
            Commands::Schema(args) => args.run(),
        }
    }
}
