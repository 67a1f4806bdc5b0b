//! gcpdocs CLI - Google Cloud documentation from the command line and over MCP

mod mcp;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gcpdocs::{ApiReferenceRequest, ExtractionResult, SearchDocsRequest, Tool, TOOL_LLMTXT};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Output format for fetch subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Markdown with YAML frontmatter
    #[default]
    Md,
    /// JSON format
    Json,
}

/// gcpdocs - Google Cloud documentation tools for AI agents
#[derive(Parser, Debug)]
#[command(name = "gcpdocs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    config: Config,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

/// Settings shared by every subcommand
#[derive(Args, Debug, Clone)]
struct Config {
    /// Custom User-Agent
    #[arg(long, global = true, env = "GCPDOCS_USER_AGENT")]
    user_agent: Option<String>,

    /// Documentation base URL
    #[arg(long, global = true, env = "GCPDOCS_DOCS_BASE_URL")]
    docs_base_url: Option<String>,

    /// Web search endpoint used by the search probe
    #[arg(long, global = true, env = "GCPDOCS_SEARCH_URL")]
    search_url: Option<String>,

    /// Documentation site search endpoint
    #[arg(long, global = true, env = "GCPDOCS_SITE_SEARCH_URL")]
    site_search_url: Option<String>,

    /// Timeout for documentation pages, in seconds
    #[arg(long, global = true, env = "GCPDOCS_PAGE_TIMEOUT")]
    page_timeout: Option<u64>,

    /// Timeout for search probes, in seconds
    #[arg(long, global = true, env = "GCPDOCS_SEARCH_TIMEOUT")]
    search_timeout: Option<u64>,

    /// Skip live search probes and use only the built-in keyword tables
    #[arg(long, global = true, env = "GCPDOCS_NO_SEARCH_PROBES")]
    no_search_probes: bool,
}

impl Config {
    fn build_tool(&self) -> Tool {
        let mut builder = Tool::builder().enable_search_probes(!self.no_search_probes);

        if let Some(ref ua) = self.user_agent {
            builder = builder.user_agent(ua);
        }
        if let Some(ref url) = self.docs_base_url {
            builder = builder.docs_base_url(url);
        }
        if let Some(ref url) = self.search_url {
            builder = builder.search_url(url);
        }
        if let Some(ref url) = self.site_search_url {
            builder = builder.site_search_url(url);
        }
        if let Some(secs) = self.page_timeout {
            builder = builder.page_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.search_timeout {
            builder = builder.search_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run as MCP (Model Context Protocol) server over stdio
    Mcp,
    /// Fetch a documentation page and output it as markdown with metadata frontmatter
    Fetch {
        /// Documentation path after cloud.google.com/ (or a full URL)
        path: String,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
    /// Search the documentation and print the results as JSON
    Search {
        /// Free-form search query
        query: String,

        /// Restrict the web search probe to a product (e.g. bigquery)
        #[arg(long)]
        product: Option<String>,
    },
    /// List the product catalog as JSON
    Products,
    /// Show the REST API reference of a service as JSON
    Api {
        /// Service name (e.g. compute, storage, bigquery)
        service: String,

        /// API resource (e.g. instances, buckets)
        resource: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    let tool = cli.config.build_tool();

    match cli.command {
        Some(Commands::Mcp) => {
            mcp::run_server(tool).await;
        }
        Some(Commands::Fetch { path, output }) => {
            run_fetch(&tool, &path, output).await;
        }
        Some(Commands::Search { query, product }) => {
            let mut request = SearchDocsRequest::new(query);
            if let Some(product) = product {
                request = request.product(product);
            }
            print_json(&tool.search_docs(&request).await);
        }
        Some(Commands::Products) => {
            print_json(&tool.list_products());
        }
        Some(Commands::Api { service, resource }) => {
            let mut request = ApiReferenceRequest::new(service);
            if let Some(resource) = resource {
                request = request.resource(resource);
            }
            let response = tool.api_reference(&request).await;
            print_json(&response);
            if response.is_error() {
                std::process::exit(1);
            }
        }
        None => {
            eprintln!("Usage: gcpdocs fetch <PATH>");
            eprintln!("   or: gcpdocs search <QUERY>");
            eprintln!("   or: gcpdocs mcp");
            eprintln!("   or: gcpdocs --help");
            std::process::exit(1);
        }
    }
}

/// Log to stderr; stdout carries tool output and JSON-RPC
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run_fetch(tool: &Tool, path: &str, output: OutputFormat) {
    match tool.fetch_doc(path).await {
        Ok(result) => match output {
            OutputFormat::Md => writeln_safe(&format_md_with_frontmatter(&result)),
            OutputFormat::Json => print_json(&result),
        },
        Err(e) => {
            if let OutputFormat::Json = output {
                print_json(&e.to_payload());
            }
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing response: {}", e);
        std::process::exit(1);
    });
    writeln_safe(&json);
}

/// Format an extracted page as markdown with YAML frontmatter
fn format_md_with_frontmatter(result: &ExtractionResult) -> String {
    let mut output = String::new();

    // Build frontmatter
    output.push_str("---\n");
    output.push_str(&format!("url: {}\n", result.url));
    output.push_str(&format!("title: {}\n", result.title));
    output.push_str(&format!("content_length: {}\n", result.content_length));
    if result.truncated {
        output.push_str("truncated: true\n");
    }
    output.push_str("---\n");

    output.push_str(&result.content);
    output
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
