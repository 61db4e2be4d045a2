use author_shelf::projection::{self, TagIndex};
use author_shelf::query::{QueryDefaults, QueryState, SortOption};
use author_shelf::{config, output, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("SHELF_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("SHELF_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "author-shelf")]
#[command(about = "Browse creator posts: filter, search, sort and paginate")]
#[command(long_about = "\
Browse creator posts: filter, search, sort and paginate

Your content directory is the data source. Every author has a profile and
every post is a markdown file with TOML front matter.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── authors/
  │   └── alice.md                 # Author profile, id \"alice\"
  └── posts/
      └── alice/
          ├── fox-at-dusk.md       # Post, id \"alice/fox-at-dusk\"
          └── winter-zine.mdx

Listings:
  Filter:  one tag (--tag) and/or a case-insensitive search of title and
           description (--q)
  Sort:    newest, oldest, title-asc, title-desc
  Pages:   fixed page size (12 by default); out-of-range pages are empty

A browser query string works too: --query 'q=fox&tag=art&sort=oldest&page=2'

Run 'author-shelf gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".author-shelf-temp", global = true)]
    temp_dir: PathBuf,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Listing parameters shared by `list`.
#[derive(clap::Args)]
struct ListArgs {
    /// Author whose posts to list
    #[arg(long)]
    author: String,

    /// Search title and description (case-insensitive)
    #[arg(long = "q")]
    search: Option<String>,

    /// Only posts with this tag
    #[arg(long)]
    tag: Option<String>,

    /// newest | oldest | title-asc | title-desc
    #[arg(long)]
    sort: Option<SortOption>,

    /// 1-based page number
    #[arg(long, allow_negative_numbers = true)]
    page: Option<i64>,

    /// Start from a query string such as `q=fox&tag=art&page=2`
    #[arg(long)]
    query: Option<String>,

    /// Print the listing as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Validate content directory without writing anything
    Check,
    /// List one page of an author's posts
    List(ListArgs),
    /// List an author's tags with post counts
    Tags {
        /// Author whose tags to list
        #[arg(long)]
        author: String,

        /// Print the tag index as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single post with its previous and next posts
    Show {
        /// Post id, e.g. `alice/fox-at-dusk`
        post: String,

        /// Order used to pick previous/next
        #[arg(long)]
        sort: Option<SortOption>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            tracing::info!("wrote {}", manifest_path.display());
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::List(args) => {
            let manifest = scan::scan(&cli.source)?;
            let author = manifest
                .author(&args.author)
                .ok_or_else(|| format!("unknown author `{}`", args.author))?;

            let defaults = QueryDefaults::from(&manifest.config.listing);
            let query = build_query(&args, &defaults);
            tracing::debug!(?query, "listing");

            let listing = projection::project_with(
                manifest.posts_by(&author.id),
                &query,
                manifest.config.listing.out_of_range,
            );
            let pagination = &manifest.config.pagination;
            let links = projection::page_links(
                listing.page(),
                listing.total_pages(),
                pagination.boundaries,
                pagination.siblings,
            );

            if args.json {
                let base_url = &manifest.config.site.base_url;
                let href = |page: i64| {
                    query
                        .go_to_page(page, listing.total_pages())
                        .map(|q| q.href(base_url, &defaults))
                };
                let json = serde_json::json!({
                    "author": author.id,
                    "query": query,
                    "href": query.href(base_url, &defaults),
                    "prev_href": href(listing.page().saturating_sub(1)),
                    "next_href": href(listing.page().saturating_add(1)),
                    "listing": listing,
                    "tags": TagIndex::build(manifest.posts_by(&author.id)),
                    "page_links": links,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                output::print_listing(author, &query, &listing, &links);
            }
        }
        Command::Tags { author, json } => {
            let manifest = scan::scan(&cli.source)?;
            let author = manifest
                .author(&author)
                .ok_or_else(|| format!("unknown author `{author}`"))?;
            let tags = TagIndex::build(manifest.posts_by(&author.id));
            if json {
                println!("{}", serde_json::to_string_pretty(&tags)?);
            } else {
                output::print_tags(author, &tags);
            }
        }
        Command::Show { post, sort } => {
            let manifest = scan::scan(&cli.source)?;
            let post = manifest
                .post(&post)
                .ok_or_else(|| format!("unknown post `{post}`"))?;
            let author = manifest
                .author(&post.author_id)
                .ok_or_else(|| format!("unknown author `{}`", post.author_id))?;
            let sort = sort.unwrap_or(manifest.config.listing.default_sort);
            let around = projection::neighbors(manifest.posts_by(&author.id), &post.id, sort);
            output::print_post_detail(post, author, &around);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Start from `--query` (or the configured defaults), then apply flags.
fn build_query(args: &ListArgs, defaults: &QueryDefaults) -> QueryState {
    let mut query = match &args.query {
        Some(qs) => QueryState::from_query_string(qs, defaults),
        None => QueryState::from_defaults(defaults),
    };
    if let Some(search) = &args.search {
        query = query.with_search(search);
    }
    if let Some(tag) = &args.tag {
        query = query.with_tag(tag);
    }
    if let Some(sort) = args.sort {
        query = query.with_sort(sort);
    }
    if let Some(page) = args.page {
        query.page = page;
    }
    query
}

/// Diagnostics go to stderr so `--json` output stays clean. `RUST_LOG`
/// takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}
