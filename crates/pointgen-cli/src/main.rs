mod logging;
mod settings;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use logging::{LoggingError, init_logging};
use pointgen_core::{DeviceType, GenerationInputs};
use pointgen_generate::{
    CompileOptions, GenerateOptions, GenerationContext, GenerationError, OutputEncoding,
    PointTableEngine, TemplateDir, UnaddressedPolicy, WriteOptions, load_devices,
};
use settings::{Settings, SettingsError, load_settings};
use thiserror::Error;
use tracing::info_span;

#[derive(Debug, Error)]
enum CliError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("{0}")]
    Generation(#[from] GenerationError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "pointgen",
    version,
    about = "Generate engineering point tables from device lists and templates"
)]
struct Cli {
    /// Settings file (defaults to ./pointgen.toml when present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Append JSON log lines to this file.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a point table file.
    Generate(GenerateArgs),
    /// List device types that have templates.
    DeviceTypes(TemplatesDirArg),
    /// List templates available for a device type.
    Templates(TemplatesArgs),
    /// Print the entries of a template.
    ShowTemplate(ShowTemplateArgs),
    /// Print the devices read from a device list.
    ShowDevices(ShowDevicesArgs),
}

#[derive(Args, Debug)]
struct TemplatesDirArg {
    /// Root of the template tree.
    #[arg(long, value_name = "DIR")]
    templates_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TemplatesArgs {
    /// Device type tag, e.g. SIEMENS or AB.
    device_type: DeviceType,
    #[command(flatten)]
    dir: TemplatesDirArg,
}

#[derive(Args, Debug)]
struct ShowTemplateArgs {
    device_type: DeviceType,
    /// Template name, with or without extension.
    name: String,
    #[command(flatten)]
    dir: TemplatesDirArg,
    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct ShowDevicesArgs {
    /// Device list CSV.
    devices: PathBuf,
    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Device list CSV (columns 设备代号, 设备描述, 拼接地址).
    #[arg(long, value_name = "CSV")]
    devices: PathBuf,
    /// Device type tag, e.g. SIEMENS or AB.
    #[arg(long)]
    device_type: DeviceType,
    /// Template name; required when the device type has several.
    #[arg(long)]
    template: Option<String>,
    #[command(flatten)]
    dir: TemplatesDirArg,
    /// Channel (所属通道).
    #[arg(long)]
    channel: Option<String>,
    /// Device label (所属设备).
    #[arg(long)]
    device_name: Option<String>,
    /// Driver name (驱动).
    #[arg(long)]
    drive: Option<String>,
    /// DB block number.
    #[arg(long)]
    db_num: Option<String>,
    /// Directory that receives output/.
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,
    /// Output encoding: gbk or utf8.
    #[arg(long)]
    encoding: Option<OutputEncoding>,
    /// Fail instead of leaving address columns blank for unknown device types.
    #[arg(long, default_value_t = false)]
    reject_unaddressed: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Generate(args) => run_generate(args, &settings),
        Command::DeviceTypes(args) => run_device_types(args, &settings),
        Command::Templates(args) => run_templates(args, &settings),
        Command::ShowTemplate(args) => run_show_template(args, &settings),
        Command::ShowDevices(args) => run_show_devices(args),
    }
}

fn template_dir(arg: TemplatesDirArg, settings: &Settings) -> TemplateDir {
    TemplateDir::new(arg.templates_dir.unwrap_or_else(|| settings.templates_dir.clone()))
}

fn run_generate(args: GenerateArgs, settings: &Settings) -> Result<(), CliError> {
    let GenerateArgs {
        devices,
        device_type,
        template,
        dir,
        channel,
        device_name,
        drive,
        db_num,
        base_dir,
        encoding,
        reject_unaddressed,
    } = args;

    let mut templates = template_dir(dir, settings);
    if let Some(name) = template {
        templates = templates.with_template(name);
    }

    let inputs = GenerationInputs {
        channel: channel.unwrap_or_else(|| settings.channel.clone()),
        device_name: device_name.unwrap_or_else(|| settings.device_name.clone()),
        drive: drive.unwrap_or_else(|| settings.drive_for(&device_type)),
        db_num: db_num.unwrap_or_else(|| settings.db_num.clone()),
        device_type,
    };

    let unaddressed = if reject_unaddressed {
        UnaddressedPolicy::Reject
    } else {
        settings.unaddressed
    };
    let options = GenerateOptions {
        base_dir: base_dir.unwrap_or_else(|| settings.base_dir.clone()),
        allow_empty: false,
        compile: CompileOptions { unaddressed },
        write: WriteOptions {
            encoding: encoding.unwrap_or(settings.encoding),
        },
    };

    let result = PointTableEngine::new(options).run(&devices, &templates, &inputs)?;
    println!("{}", result.message);
    Ok(())
}

fn run_device_types(args: TemplatesDirArg, settings: &Settings) -> Result<(), CliError> {
    for tag in template_dir(args, settings).device_types()? {
        println!("{tag}");
    }
    Ok(())
}

fn run_templates(args: TemplatesArgs, settings: &Settings) -> Result<(), CliError> {
    let templates = template_dir(args.dir, settings);
    for name in templates.template_names(&args.device_type)? {
        println!("{name}");
    }
    Ok(())
}

fn run_show_template(args: ShowTemplateArgs, settings: &Settings) -> Result<(), CliError> {
    let entries = template_dir(args.dir, settings).load(&args.device_type, &args.name)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("名称\t描述\t类型\t偏移字节\t偏移位");
    for entry in &entries {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            entry.name, entry.desc, entry.point_type, entry.add_byte, entry.add_bit
        );
    }
    Ok(())
}

fn run_show_devices(args: ShowDevicesArgs) -> Result<(), CliError> {
    let ctx = GenerationContext::from_span(info_span!("show_devices"));
    let devices = load_devices(&args.devices, &ctx)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    println!("设备代号\t设备描述\t拼接地址");
    for device in &devices {
        println!(
            "{}\t{}\t{}",
            device.code, device.description, device.base_offset
        );
    }
    Ok(())
}
