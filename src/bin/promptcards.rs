use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use promptcards::{
    BatchThreading, CardRenderer, CardSpec, CardStyle, EXPORT_SUFFIX, FixedAdvanceText,
    FontSource, FontText, IconSelector, JsonFileStore, RenderedCard, Rgba8, Settings, Template,
    TemplateLibrary, TextBackend,
};

#[derive(Parser, Debug)]
#[command(name = "promptcards", version)]
struct Cli {
    /// JSON file holding saved settings and templates.
    #[arg(long, global = true, default_value = "promptcards.json")]
    store: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one PNG card per prompt.
    Render(RenderArgs),
    /// Print the resolved card spec as JSON.
    Spec(StyleArgs),
    /// Write a standalone icon badge as SVG or PNG (picked by the output extension).
    Icon(IconArgs),
    /// Manage saved prompt templates.
    #[command(subcommand)]
    Template(TemplateCommand),
}

#[derive(Parser, Debug)]
struct StyleArgs {
    /// Color scheme: `black`, `white` or `custom[:<bg-hex>[:<text-hex>]]`.
    #[arg(long)]
    style: Option<CardStyle>,

    /// Caption printed next to the badge.
    #[arg(long)]
    caption: Option<String>,

    /// Badge: `none`, `warning`, `thinking`, `blocked`, `emoji` or `emoji:<glyph>`.
    #[arg(long)]
    icon: Option<IconSelector>,

    /// Response area height in percent of the card (0..=50).
    #[arg(long)]
    response_percent: Option<u8>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Text file with one prompt per line.
    #[arg(long, conflicts_with = "template")]
    prompts: Option<PathBuf>,

    /// Single prompt; may be repeated.
    #[arg(long = "prompt", conflicts_with_all = ["prompts", "template"])]
    prompt: Vec<String>,

    /// Render the prompts and style of a saved or built-in template.
    #[arg(long)]
    template: Option<String>,

    /// Card spec JSON; overrides every style option.
    #[arg(long)]
    spec: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Render on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,

    /// Font file (falls back to $PROMPTCARDS_FONT, then the system sans-serif face).
    #[arg(long, conflicts_with = "fixed_metrics")]
    font: Option<PathBuf>,

    /// Draw text as fixed-advance boxes instead of glyphs. Needs no font.
    #[arg(long)]
    fixed_metrics: bool,

    /// Persist the effective settings into the store.
    #[arg(long, conflicts_with = "spec")]
    save_settings: bool,
}

#[derive(Parser, Debug)]
struct IconArgs {
    /// Badge selector, same syntax as `--icon`.
    icon: IconSelector,

    /// Edge length in pixels.
    #[arg(long, default_value_t = 96)]
    size: u32,

    /// Badge color as hex.
    #[arg(long, default_value = "#ffffff")]
    color: Rgba8,

    /// Output path ending in `.svg` or `.png`.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Subcommand, Debug)]
enum TemplateCommand {
    /// List saved and built-in templates.
    List,
    /// Print one template as JSON.
    Show {
        /// Template name.
        name: String,
    },
    /// Save the prompts in a file as a new template.
    Save {
        /// Template name.
        name: String,
        /// Text file with one prompt per line.
        #[arg(long)]
        prompts: PathBuf,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Delete a saved template.
    Delete {
        /// Template name.
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(&cli.store, args),
        Command::Spec(args) => cmd_spec(&cli.store, &args),
        Command::Icon(args) => cmd_icon(&args),
        Command::Template(cmd) => cmd_template(&cli.store, cmd),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("PROMPTCARDS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_style(mut settings: Settings, args: &StyleArgs) -> Settings {
    if let Some(style) = args.style {
        settings.style = style;
    }
    if let Some(caption) = &args.caption {
        settings.caption_text = caption.clone();
    }
    if let Some(icon) = &args.icon {
        settings.icon = icon.clone();
    }
    if let Some(pct) = args.response_percent {
        settings.response_percent = pct;
    }
    settings
}

fn read_prompts_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read prompts '{}'", path.display()))
}

fn cmd_render(store_path: &Path, args: RenderArgs) -> anyhow::Result<()> {
    let mut store = JsonFileStore::new(store_path);
    let mut settings = promptcards::load_settings(&store)?;

    let prompts = if let Some(name) = &args.template {
        let library = TemplateLibrary::new(JsonFileStore::new(store_path));
        let template = library
            .get(name)?
            .with_context(|| format!("no template named '{name}'"))?;
        settings = template.settings;
        template.prompts
    } else if let Some(path) = &args.prompts {
        settings.prompt_text = read_prompts_file(path)?;
        settings.prompts()
    } else if !args.prompt.is_empty() {
        settings.prompt_text = args.prompt.join("\n");
        settings.prompts()
    } else {
        settings.prompts()
    };
    anyhow::ensure!(
        !prompts.is_empty(),
        "no prompts: pass --prompts, --prompt or --template"
    );

    let spec = match &args.spec {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read spec '{}'", path.display()))?;
            CardSpec::from_json(&json)?
        }
        None => {
            settings = apply_style(settings, &args.style);
            let spec = settings.card_spec()?;
            if args.save_settings {
                promptcards::save_settings(&mut store, &settings)?;
                eprintln!("saved settings to {}", store_path.display());
            }
            spec
        }
    };

    let text = TextChoice::from_args(&args)?;
    let cards: Vec<promptcards::CardResult<RenderedCard>> = if args.parallel {
        let threading = BatchThreading {
            threads: args.threads,
        };
        promptcards::render_batch_parallel(&prompts, &spec, &threading, || text.backend())?
    } else {
        let mut renderer = CardRenderer::new(text.backend());
        renderer.render_batch(&prompts, &spec).collect()
    };

    let mut used: HashMap<String, usize> = HashMap::new();
    let mut failed = 0usize;
    for (prompt, card) in prompts.iter().zip(cards) {
        let card = match card {
            Ok(card) => card,
            Err(e) if !e.is_per_card() => return Err(e.into()),
            Err(e) => {
                failed += 1;
                eprintln!("failed to render '{prompt}': {e}");
                continue;
            }
        };
        if card.overflows_response_area() {
            eprintln!("warning: '{prompt}' runs into the response area");
        }
        let name = unique_file_name(&mut used, card.file_name());
        let path = card.write_as(&args.out, &name)?;
        eprintln!("wrote {}", path.display());
    }

    anyhow::ensure!(failed == 0, "{failed} of {} cards failed", prompts.len());
    Ok(())
}

/// Keeps batch exports from overwriting each other: the second `x-info-card.png` becomes
/// `x-2-info-card.png`.
fn unique_file_name(used: &mut HashMap<String, usize>, name: &str) -> String {
    let seen = used.entry(name.to_string()).or_insert(0);
    *seen += 1;
    if *seen == 1 {
        return name.to_string();
    }
    let stem = name.strip_suffix(EXPORT_SUFFIX).unwrap_or(name);
    format!("{stem}-{seen}{EXPORT_SUFFIX}")
}

/// Text backend recipe that can be instantiated once per worker.
enum TextChoice {
    Fixed,
    Font(FontSource),
}

impl TextChoice {
    fn from_args(args: &RenderArgs) -> anyhow::Result<Self> {
        if args.fixed_metrics {
            return Ok(Self::Fixed);
        }
        let source = match &args.font {
            Some(path) => FontSource::File(path.clone()),
            None => FontSource::from_env(),
        };
        // Read once so parallel workers share the bytes.
        let source = match source {
            FontSource::File(path) => {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read font '{}'", path.display()))?;
                FontSource::Bytes(Arc::new(bytes))
            }
            other => other,
        };
        Ok(Self::Font(source))
    }

    fn backend(&self) -> Box<dyn TextBackend> {
        match self {
            Self::Fixed => Box::new(FixedAdvanceText::new()),
            Self::Font(source) => Box::new(FontText::new(source.clone())),
        }
    }
}

fn cmd_spec(store_path: &Path, args: &StyleArgs) -> anyhow::Result<()> {
    let settings = apply_style(
        promptcards::load_settings(&JsonFileStore::new(store_path))?,
        args,
    );
    println!("{}", settings.card_spec()?.to_json_pretty()?);
    Ok(())
}

fn cmd_icon(args: &IconArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.size > 0, "--size must be > 0");
    let svg = promptcards::icon_svg(&args.icon, args.size, args.color);

    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let bytes = match ext.as_deref() {
        Some("svg") => svg.into_bytes(),
        Some("png") => {
            let frame = promptcards::rasterize_icon_svg(&svg, args.size)?;
            promptcards::encode_png(&frame)?
        }
        _ => anyhow::bail!("--out must end in .svg or .png"),
    };

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, bytes)
        .with_context(|| format!("write icon '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_template(store_path: &Path, cmd: TemplateCommand) -> anyhow::Result<()> {
    let mut library = TemplateLibrary::new(JsonFileStore::new(store_path));
    match cmd {
        TemplateCommand::List => {
            for template in promptcards::builtin_templates() {
                println!("{}\t{} prompts\tbuilt-in", template.name, template.prompts.len());
            }
            for template in library.list()? {
                println!("{}\t{} prompts", template.name, template.prompts.len());
            }
        }
        TemplateCommand::Show { name } => {
            let template = library
                .get(&name)?
                .with_context(|| format!("no template named '{name}'"))?;
            println!("{}", serde_json::to_string_pretty(&template)?);
        }
        TemplateCommand::Save {
            name,
            prompts,
            style,
        } => {
            let text = read_prompts_file(&prompts)?;
            let settings = apply_style(Settings::default(), &style);
            // Fail before saving a template that could never render.
            settings.card_spec()?;
            let template = Template::new(name.as_str(), promptcards::parse_prompts(&text))
                .with_settings(settings);
            library.create(template)?;
            eprintln!("saved template '{}'", name.trim());
        }
        TemplateCommand::Delete { name } => {
            anyhow::ensure!(library.delete(&name)?, "no saved template named '{name}'");
            eprintln!("deleted template '{name}'");
        }
    }
    Ok(())
}
