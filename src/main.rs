use std::path::{Path, PathBuf};

use alloy_primitives::hex;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Value as JsonValue, json};

use move_abi_client::bcs;
use move_abi_client::config::ClientConfig;
use move_abi_client::decoder::ReturnDecoder;
use move_abi_client::dispatch::{CallKind, DispatchTable};
use move_abi_client::payload::{build_entry, build_view};
use move_abi_client::schema::{ModuleAbi, guid};
use move_abi_client::subscriber;
use move_abi_client::{HostValue, TypeDescriptor};

/// ABI documents shipped with the binary.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Builtin {
    /// The framework `0x1::guid` module.
    Guid,
}

#[derive(Parser)]
#[command(name = "move-abi")]
#[command(about = "Build, encode and decode Move module calls from a module ABI")]
struct Cli {
    /// Path to a module ABI JSON document
    #[arg(long, global = true, env = "MOVE_ABI", conflicts_with = "builtin")]
    abi: Option<PathBuf>,

    /// Use a bundled ABI instead of a file
    #[arg(long, global = true, value_enum)]
    builtin: Option<Builtin>,

    /// TOML configuration file
    #[arg(long, global = true, env = "MOVE_ABI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the operations the ABI can dispatch
    Functions {
        /// Only list functions the ABI marks as view or entry
        #[arg(long)]
        strict: bool,
    },

    /// Build a view request
    View {
        /// Operation name (viewCreationNum) or function name (creation_num)
        name: String,

        /// Arguments as a JSON array
        #[arg(short, long, default_value = "[]")]
        args: String,

        /// Type argument, repeated once per generic parameter
        #[arg(short = 't', long = "type-arg")]
        type_args: Vec<String>,
    },

    /// Build and encode an entry-function call
    Entry {
        /// Operation name (entryCreateId) or function name (create_id)
        name: String,

        /// Arguments as a JSON array, without the signer
        #[arg(short, long, default_value = "[]")]
        args: String,

        /// Type argument, repeated once per generic parameter
        #[arg(short = 't', long = "type-arg")]
        type_args: Vec<String>,
    },

    /// Encode a single JSON value under a type tag
    Encode {
        /// Type tag, e.g. "vector<u64>"
        #[arg(long = "type")]
        type_tag: String,

        /// JSON value to encode
        #[arg(short, long)]
        value: String,
    },

    /// Decode canonical bytes under a type tag
    Decode {
        /// Type tag, e.g. "0x1::string::String"
        #[arg(long = "type")]
        type_tag: String,

        /// Hex-encoded bytes (0x prefix optional)
        #[arg(long)]
        hex: String,
    },

    /// Parse a type tag and show its structure
    ParseType {
        /// Type tag to parse
        tag: String,
    },
}

fn main() -> anyhow::Result<()> {
    let Cli {
        abi,
        builtin,
        config,
        command,
    } = Cli::parse();

    let config = match &config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    subscriber::init(&config.logging)?;

    match command {
        Commands::Functions { strict } => {
            let abi = load_abi(abi.as_deref(), builtin)?;
            let table = if strict {
                DispatchTable::strict(&abi)
            } else {
                DispatchTable::new(&abi)
            };
            for (name, op) in table.operations() {
                let Some(signature) = abi.function(&op.function) else {
                    continue;
                };
                println!(
                    "{:<28} {:<5} {}({}) -> ({})",
                    name,
                    op.kind.prefix(),
                    abi.function_id(&op.function),
                    signature.params.join(", "),
                    signature.returns.join(", ")
                );
            }
        }

        Commands::View {
            name,
            args,
            type_args,
        } => {
            let abi = load_abi(abi.as_deref(), builtin)?;
            let function = resolve_function(&abi, &name, CallKind::View)?;
            let arguments = parse_arguments(&args)?;
            let payload = build_view(&abi, &function, &type_args, &arguments)?;

            let decoders: Vec<JsonValue> = payload
                .decoders
                .iter()
                .map(|d| match d {
                    Some(ReturnDecoder::WideInteger(kind)) => json!(kind.name()),
                    None => JsonValue::Null,
                })
                .collect();
            let out = json!({
                "request": payload.request,
                "decoders": decoders,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Commands::Entry {
            name,
            args,
            type_args,
        } => {
            let abi = load_abi(abi.as_deref(), builtin)?;
            let function = resolve_function(&abi, &name, CallKind::Entry)?;
            let arguments = parse_arguments(&args)?;
            let payload = build_entry(&abi, &function, &type_args, &arguments)?;

            let out = json!({
                "function": payload.raw.function,
                "type_arguments": payload.raw.type_arguments,
                "arguments": payload.raw.arguments.iter().map(HostValue::to_json).collect::<Vec<_>>(),
                "encoded_arguments": payload
                    .entry_function
                    .args
                    .iter()
                    .map(hex::encode_prefixed)
                    .collect::<Vec<_>>(),
                "entry_function": hex::encode_prefixed(payload.entry_function.to_bytes()?),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Commands::Encode { type_tag, value } => {
            let ty = TypeDescriptor::parse(&type_tag)?;
            let json: JsonValue =
                serde_json::from_str(&value).with_context(|| format!("invalid JSON value: {value}"))?;
            let bytes = bcs::encode(&ty, &HostValue::from(json))?;
            println!("{}", hex::encode_prefixed(bytes));
        }

        Commands::Decode { type_tag, hex: input } => {
            let ty = TypeDescriptor::parse(&type_tag)?;
            let bytes = hex::decode(input.trim()).with_context(|| format!("invalid hex: {input}"))?;
            let value = bcs::decode(&ty, &bytes)?;
            println!("{}", serde_json::to_string_pretty(&value.to_json())?);
        }

        Commands::ParseType { tag } => {
            let ty = TypeDescriptor::parse(&tag)?;
            println!("{ty}");
            println!("{ty:#?}");
        }
    }

    Ok(())
}

fn load_abi(path: Option<&Path>, builtin: Option<Builtin>) -> anyhow::Result<ModuleAbi> {
    match (path, builtin) {
        (Some(path), _) => ModuleAbi::from_file(path)
            .with_context(|| format!("loading ABI from {}", path.display())),
        (None, Some(Builtin::Guid)) => Ok(guid::guid_abi()?),
        (None, None) => bail!("pass --abi <path> or --builtin guid"),
    }
}

/// Accept either a generated operation name or a plain function name.
fn resolve_function(abi: &ModuleAbi, name: &str, kind: CallKind) -> anyhow::Result<String> {
    if abi.function(name).is_some() {
        return Ok(name.to_string());
    }
    let table = DispatchTable::new(abi);
    let op = table.resolve(name)?;
    if op.kind != kind {
        bail!("{name} is a {} operation", op.kind.prefix());
    }
    Ok(op.function.clone())
}

fn parse_arguments(args: &str) -> anyhow::Result<Vec<HostValue>> {
    let json: JsonValue =
        serde_json::from_str(args).with_context(|| format!("invalid JSON arguments: {args}"))?;
    match json {
        JsonValue::Array(items) => Ok(items.into_iter().map(HostValue::from).collect()),
        other => bail!("arguments must be a JSON array, got {other}"),
    }
}
