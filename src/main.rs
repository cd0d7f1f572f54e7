use anyhow::{bail, Context};
use clap::Parser;
use responsive_srcset::{
    HostnameMap, QueryUrlBuilder, SrcsetBuilder, SrcsetConfig, SrcsetOptions, UrlBuilderConfig,
};

/// Print the srcset attribute value for an image source
#[derive(Parser, Debug)]
#[command(name = "responsive-srcset", version, about)]
struct Cli {
    /// Image path or absolute URL
    source: String,

    /// Image host the generated URLs point at
    #[arg(long, env = "SRCSET_HOST", default_value = "")]
    host: String,

    /// Generate http:// URLs instead of https://
    #[arg(long)]
    http: bool,

    /// Token used to sign every generated URL
    #[arg(long, env = "SRCSET_TOKEN")]
    token: Option<String>,

    /// Rewrite source URLs on this host to the image host (repeatable)
    #[arg(long = "replace-host", value_name = "HOST")]
    replace_hosts: Vec<String>,

    /// Intended display width in CSS pixels
    #[arg(short = 'w', long = "width")]
    width: Option<u32>,

    /// Intended display height in CSS pixels
    #[arg(short = 'H', long = "height")]
    height: Option<u32>,

    #[arg(long)]
    min_width: Option<u32>,

    #[arg(long)]
    max_width: Option<u32>,

    /// Explicit widths, bypassing width selection
    #[arg(long, value_delimiter = ',')]
    widths: Vec<u32>,

    /// Extra transform parameter as key=value (repeatable)
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Options as a JSON object, applied before the flags above
    #[arg(long, value_name = "JSON")]
    options: Option<String>,

    /// Upper bound of the screen sweep
    #[arg(long, default_value_t = SrcsetConfig::default().max_screen_width)]
    max_screen_width: u32,

    /// Step of the screen sweep
    #[arg(long, default_value_t = SrcsetConfig::default().screen_step)]
    screen_step: u32,

    /// Print the selected widths, one per line, instead of a srcset
    #[arg(long)]
    widths_only: bool,

    /// Print the resolved widths to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn srcset_options(&self) -> anyhow::Result<SrcsetOptions> {
        let base = match &self.options {
            Some(json) => SrcsetOptions::from_json(json).context("parsing --options")?,
            None => SrcsetOptions::default(),
        };
        let mut flags = SrcsetOptions::from_pairs(&self.params).context("parsing --param")?;
        flags.w = self.width.or(flags.w);
        flags.h = self.height.or(flags.h);
        flags.min_width = self.min_width.or(flags.min_width);
        flags.max_width = self.max_width.or(flags.max_width);
        if !self.widths.is_empty() {
            flags.widths = Some(self.widths.clone());
        }
        Ok(base.merge(flags))
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = cli.srcset_options()?;
    let config = SrcsetConfig {
        max_screen_width: cli.max_screen_width,
        screen_step: cli.screen_step,
        ..Default::default()
    };

    if cli.widths_only {
        config.validate()?;
        let widths = match &options.widths {
            Some(w) => w.clone(),
            None => responsive_srcset::target_widths(options.range(), options.w, &config),
        };
        for w in widths {
            println!("{}", w);
        }
        return Ok(());
    }

    if cli.host.trim().is_empty() {
        bail!("an image host is required (--host or SRCSET_HOST)");
    }
    let urls = QueryUrlBuilder::new(UrlBuilderConfig {
        host: cli.host.clone(),
        use_https: !cli.http,
        secure_url_token: cli.token.clone(),
        include_library_param: false,
    })?;
    let resolver = cli
        .replace_hosts
        .iter()
        .fold(HostnameMap::new(), |map, from| map.replace(from.as_str(), cli.host.as_str()));

    let builder = SrcsetBuilder::new(&urls).with_resolver(resolver).with_config(config)?;
    if cli.verbose {
        eprintln!("widths: {:?}", builder.widths(&options));
    }
    let srcset = builder
        .build(&cli.source, &options)
        .with_context(|| format!("building srcset for {}", cli.source))?;
    println!("{}", srcset);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("responsive-srcset: {:#}", e);
        std::process::exit(1);
    }
}
