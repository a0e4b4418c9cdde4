//! CLI binary for the CrossRef client.
//!
//! Usage: crossref works --query "dark matter" --filter type:journal-article --rows 10

#[cfg(feature = "cli")]
mod cli {
    use clap::{Parser, Subcommand};
    use crossref_client::{
        CrossRefClient, Endpoint, EndpointKind, EndpointResult, QueryOptions,
        Sort, SortDirection, Work, ENDPOINTS,
    };
    use tracing_subscriber::EnvFilter;

    #[derive(Parser)]
    #[command(name = "crossref", about = "CrossRef REST API client", version)]
    struct Cli {
        /// Contact address for CrossRef's polite pool (overrides CROSSREF_MAILTO)
        #[arg(long, global = true)]
        mailto: Option<String>,

        /// Output format
        #[arg(long, global = true, default_value = "table")]
        output: OutputFormat,

        /// Increase log verbosity (-v, -vv, -vvv)
        #[arg(short, long, global = true, action = clap::ArgAction::Count)]
        verbose: u8,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Clone, Copy, clap::ValueEnum)]
    enum OutputFormat {
        Table,
        Json,
    }

    #[derive(clap::Args)]
    struct ListArgs {
        /// Free-text query
        #[arg(short, long)]
        query: Option<String>,
        /// Filter clause as field:value (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,
        /// Results per page
        #[arg(short, long)]
        rows: Option<u64>,
        /// Start index
        #[arg(long)]
        offset: Option<u64>,
        /// Sort order (e.g., "published desc", "is-referenced-by-count desc")
        #[arg(short, long)]
        sort: Option<String>,
        /// Request facet counts
        #[arg(long)]
        facet: bool,
        /// Follow continuation for up to this many pages
        #[arg(long, default_value = "1")]
        all_pages: u32,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Show metadata for a DOI
        Work {
            /// DOI
            doi: String,
        },
        /// Search works
        Works {
            #[command(flatten)]
            list: ListArgs,
        },
        /// Call any endpoint by name (see `crossref endpoints`)
        Get {
            /// Endpoint name, e.g. funder, memberWorks, licenses
            endpoint: String,
            /// Path parameter (DOI, funder id, ISSN, ...)
            param: Option<String>,
            #[command(flatten)]
            list: ListArgs,
        },
        /// List known endpoints
        Endpoints,
    }

    fn setup_logging(verbosity: u8) {
        let filter = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    }

    fn make_client(mailto: Option<String>) -> crossref_client::error::Result<CrossRefClient> {
        match mailto {
            Some(m) => CrossRefClient::new()?.with_mailto(&m),
            None => CrossRefClient::from_env(),
        }
    }

    fn parse_sort(s: &str) -> Sort {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let field = parts.first().copied().unwrap_or("relevance");
        let dir = match parts.get(1).copied() {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        };
        Sort::new(field, dir)
    }

    fn build_options(args: &ListArgs) -> QueryOptions {
        let mut options = QueryOptions::new().facet(args.facet);
        if let Some(q) = &args.query {
            options = options.query(q.as_str());
        }
        for clause in &args.filter {
            options = match clause.split_once(':') {
                Some((field, value)) => options.filter(field, value),
                None => options.filter(clause.as_str(), ""),
            };
        }
        if let Some(rows) = args.rows {
            options = options.rows(rows);
        }
        if let Some(offset) = args.offset {
            options = options.offset(offset);
        }
        if let Some(sort) = &args.sort {
            options = options.sort(parse_sort(sort));
        }
        options
    }

    fn print_works_table(items: &[serde_json::Value]) {
        use comfy_table::{ContentArrangement, Table};

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["DOI", "Year", "First Author", "Title", "Cited"]);

        for item in items {
            let Ok(work) = serde_json::from_value::<Work>(item.clone()) else {
                continue;
            };
            let first_author = work
                .author
                .first()
                .map(|a| a.display_name())
                .unwrap_or_else(|| "-".to_string());
            let year = work.year().map(|y| y.to_string()).unwrap_or_default();
            let cited = work
                .is_referenced_by_count
                .map(|c| c.to_string())
                .unwrap_or_default();
            let title: String = if work.first_title().chars().count() > 60 {
                let short: String = work.first_title().chars().take(57).collect();
                format!("{}...", short)
            } else {
                work.first_title().to_string()
            };

            table.add_row(vec![&work.doi, &year, &first_author, &title, &cited]);
        }

        println!("{table}");
    }

    fn print_json(value: &impl serde::Serialize) -> crossref_client::error::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Fetch up to `--all-pages` pages, following `next_options`.
    async fn run_list(
        client: &CrossRefClient,
        endpoint: &Endpoint,
        param: Option<&str>,
        args: &ListArgs,
        output: OutputFormat,
    ) -> crossref_client::error::Result<()> {
        let mut options = build_options(args);
        for _ in 0..args.all_pages.max(1) {
            let page = client.fetch_page(endpoint.template, param, &options).await?;
            match output {
                OutputFormat::Json => print_json(&page.items)?,
                OutputFormat::Table if endpoint.template.ends_with("works") => {
                    if let Some(total) = page.total_results() {
                        println!("Found {} results:", total);
                    }
                    print_works_table(&page.items);
                }
                OutputFormat::Table => {
                    for item in &page.items {
                        println!("{}", item);
                    }
                }
            }
            if page.is_done {
                break;
            }
            options = page.next_options;
        }
        Ok(())
    }

    pub async fn run() -> crossref_client::error::Result<()> {
        let cli = Cli::parse();
        setup_logging(cli.verbose);
        let client = make_client(cli.mailto)?;

        match cli.command {
            Commands::Work { doi } => {
                let value = client.work(&doi).await?;
                match cli.output {
                    OutputFormat::Json => print_json(&value)?,
                    OutputFormat::Table => print_works_table(std::slice::from_ref(&value)),
                }
            }

            Commands::Works { list } => {
                run_list(&client, &crossref_client::endpoints::WORKS, None, &list, cli.output)
                    .await?;
            }

            Commands::Get {
                endpoint,
                param,
                list,
            } => {
                let Some(ep) = Endpoint::lookup(&endpoint) else {
                    eprintln!("Unknown endpoint `{}` (see `crossref endpoints`)", endpoint);
                    std::process::exit(2);
                };
                if ep.takes_param() && param.is_none() {
                    eprintln!("Endpoint `{}` needs a parameter: {}", ep.name, ep.template);
                    std::process::exit(2);
                }
                match ep.kind {
                    EndpointKind::List => {
                        run_list(&client, ep, param.as_deref(), &list, cli.output).await?
                    }
                    EndpointKind::Item => {
                        if let EndpointResult::Item(value) =
                            client.fetch(ep, param.as_deref(), &QueryOptions::new()).await?
                        {
                            print_json(&value)?;
                        }
                    }
                }
            }

            Commands::Endpoints => {
                use comfy_table::{ContentArrangement, Table};
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["Name", "Path", "Kind"]);
                for ep in ENDPOINTS {
                    let kind = match ep.kind {
                        EndpointKind::Item => "item",
                        EndpointKind::List => "list",
                    };
                    table.add_row(vec![ep.name, ep.template, kind]);
                }
                println!("{table}");
            }
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary requires the 'cli' feature. Build with: cargo build --features cli");
    std::process::exit(1);
}
