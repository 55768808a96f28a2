use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use nvattr::config::OutputFormat;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "nvattr",
    bin_name = "nvattr",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Validate and inspect display-driver attribute strings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Display used for strings that name none (e.g. "localhost:0.0")
    #[arg(long, global = true, help_heading = "Options")]
    pub display: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, help_heading = "Options")]
    pub format: Option<FormatArg>,

    /// Config overrides as key=value pairs, comma separated
    #[arg(
        short = 'o',
        long = "option",
        global = true,
        value_name = "KEY=VALUE,...",
        help_heading = "Options"
    )]
    pub options: Vec<String>,

    /// Config file to read instead of the default location
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse attribute strings that read a value
    #[command(alias = "q")]
    Query {
        /// Attribute strings, e.g. "localhost:0.0/Brightness"
        #[arg(required = true)]
        attributes: Vec<String>,
    },

    /// Parse attribute strings that assign a value
    #[command(alias = "a")]
    Assign {
        /// Attribute strings, e.g. "[gpu:0]/GPUTargetFanSpeed=40"
        #[arg(required = true)]
        attributes: Vec<String>,
    },

    /// List known attributes
    #[command(alias = "ls")]
    List {
        /// Include attributes excluded from query-all sweeps
        #[arg(long)]
        all: bool,
    },

    /// Convert between display device lists and masks
    #[command(group(ArgGroup::new("input").required(true).args(["devices", "from_mask"])))]
    Mask {
        /// Device list, e.g. "CRT-0,DFP"
        devices: Option<String>,

        /// Mask to name, in hex (e.g. 0x10002)
        #[arg(long, value_name = "HEX")]
        from_mask: Option<String>,
    },

    /// Describe parser status codes
    Status {
        /// Numeric status code; all codes when omitted
        code: Option<i32>,
    },
}
