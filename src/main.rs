use clap::Parser;
use hbnb::cli::{
    handle_all, handle_count, handle_create, handle_destroy, handle_show, handle_update, Cli,
    Commands,
};
use hbnb::logging::init_logger;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let file = cli.file.as_path();
    let result = match &cli.command {
        Commands::Create { class } => handle_create(file, class),
        Commands::Show { class, id } => handle_show(file, class, id),
        Commands::Destroy { class, id } => handle_destroy(file, class, id),
        Commands::All { class } => handle_all(file, class.as_deref()),
        Commands::Count { class } => handle_count(file, class),
        Commands::Update {
            class,
            id,
            attribute,
            value,
        } => handle_update(file, class, id, attribute, value),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
