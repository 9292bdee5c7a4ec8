//! TreeDB CLI
//!
//! Command-line front end for a TreeDB data directory.

use clap::{Parser, Subcommand, ValueEnum};
use treedb::{Config, Engine, TraversalOrder};
use tracing_subscriber::{fmt, EnvFilter};

/// TreeDB CLI
#[derive(Parser, Debug)]
#[command(name = "treedb-cli")]
#[command(about = "CLI for the TreeDB record store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./treedb_data")]
    data_dir: String,

    /// Required key length (0 disables the check)
    #[arg(short, long, default_value = "11")]
    key_length: usize,

    /// Accept keys containing non-digit characters
    #[arg(long)]
    any_key: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert a record
    Insert {
        /// The record key
        key: String,

        /// Payload fields (name, birth date, ...)
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Look up a record by key
    Get {
        /// The key to look up
        key: String,
    },

    /// Delete a record
    Remove {
        /// The key to delete
        key: String,
    },

    /// Print live records in key order
    Export,

    /// Print index traversals
    Traverse {
        /// Order to print (all orders when omitted)
        #[arg(value_enum)]
        order: Option<Order>,
    },

    /// Print store counters
    Stats,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Order {
    In,
    Pre,
    Post,
    Level,
}

impl From<Order> for TraversalOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::In => TraversalOrder::InOrder,
            Order::Pre => TraversalOrder::PreOrder,
            Order::Post => TraversalOrder::PostOrder,
            Order::Level => TraversalOrder::LevelOrder,
        }
    }
}

fn main() {
    // Initialize tracing/logging (stderr keeps stdout for results)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,treedb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> treedb::Result<()> {
    let key_length = (args.key_length > 0).then_some(args.key_length);

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .key_length(key_length)
        .numeric_keys(!args.any_key)
        .build();

    let mut engine = Engine::open(config)?;

    match args.command {
        Commands::Insert { key, fields } => {
            let position = engine.insert(&key, fields)?;
            println!("inserted {} at position {}", key.trim(), position);
        }
        Commands::Get { key } => match engine.get(&key)? {
            Some(record) => println!("{}", record),
            None => println!("not found"),
        },
        Commands::Remove { key } => {
            engine.remove(&key)?;
            println!("removed {}", key.trim());
        }
        Commands::Export => {
            for record in engine.export() {
                println!("{}", record);
            }
        }
        Commands::Traverse { order } => {
            let orders: Vec<TraversalOrder> = match order {
                Some(order) => vec![order.into()],
                None => TraversalOrder::ALL.to_vec(),
            };
            for order in orders {
                let positions = engine.store().traverse_positions(order);
                println!("{}: {:?}", order, positions);
            }
        }
        Commands::Stats => {
            let stats = engine.stats();
            println!("records:      {}", stats.records);
            println!("live:         {}", stats.live);
            println!("tombstoned:   {}", stats.tombstoned);
            println!("orphaned:     {}", stats.orphaned);
            println!("index height: {}", stats.index_height);
        }
    }

    engine.close()
}
