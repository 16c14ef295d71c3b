//! prism — command-line shader cross-compiler.
//!
//! Compiles a vertex + fragment GLSL pair to one or more target shading
//! languages and packages the results into an embeddable C/C++ header.
//! Per-target failures are reported and skipped; the process exits
//! non-zero at the end if anything failed.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use prism_core::{CompileOptions, CompiledShader, ShaderStage, TargetLanguage};

struct CliArgs {
    vertex_path: Option<String>,
    fragment_path: Option<String>,
    output_path: String,
    prefix: String,
    targets: Vec<TargetLanguage>,
    all_targets: bool,
    help: bool,
    verbose: bool,
    options: CompileOptions,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            vertex_path: None,
            fragment_path: None,
            output_path: "shaders.h".to_string(),
            prefix: "g_".to_string(),
            targets: Vec::new(),
            all_targets: false,
            help: false,
            verbose: false,
            options: CompileOptions::default(),
        }
    }
}

fn print_usage() {
    println!(
        r#"prism - cross-platform shader compiler

Usage:
  prism [options] <vertex.glsl> <fragment.glsl>

Options:
  -o, --output <file>       Output header file (default: shaders.h)
  -t, --target <lang>       Target language: spirv, glsl, glsl_es, hlsl, metal
                            Can be specified multiple times
  --all                     Generate all target languages
  --prefix <name>           Variable prefix (default: g_)

  --glsl-version <ver>      GLSL version (default: 410)
  --glsl-es-version <ver>   GLSL ES version (default: 300)
  --hlsl-model <ver>        HLSL shader model (default: 50)
  --metal-version <ver>     Metal version (default: 20100)

  --420pack                 Allow explicit bindings below GLSL 4.20
  --no-decoration-binding   Disable Metal decoration binding

  -v, --verbose             Verbose output
  -h, --help                Show this help

Examples:
  # Compile to all targets
  prism --all -o shaders.h vertex.glsl fragment.glsl

  # Compile to specific targets
  prism -t metal -t glsl -o shaders.h vertex.glsl fragment.glsl
"#
    );
}

fn parse_target(value: &str) -> Result<TargetLanguage> {
    let target = match value {
        "spirv" | "spv" => TargetLanguage::Spirv,
        "glsl" | "gl" => TargetLanguage::Glsl,
        "glsl_es" | "gles" | "es" => TargetLanguage::GlslEs,
        "hlsl" | "dx" => TargetLanguage::Hlsl,
        "metal" | "msl" => TargetLanguage::Metal,
        other => bail!("unknown target: {other}"),
    };
    Ok(target)
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut i = 0;

    let value = |i: &mut usize, flag: &str| -> Result<String> {
        *i += 1;
        args.get(*i)
            .cloned()
            .with_context(|| format!("{flag} requires a value"))
    };

    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => cli.help = true,
            "-v" | "--verbose" => cli.verbose = true,
            "--all" => cli.all_targets = true,
            "-o" | "--output" => cli.output_path = value(&mut i, arg)?,
            "-t" | "--target" => cli.targets.push(parse_target(&value(&mut i, arg)?)?),
            "--prefix" => cli.prefix = value(&mut i, arg)?,
            "--glsl-version" => {
                cli.options.glsl_version = value(&mut i, arg)?.parse().context("--glsl-version")?;
            }
            "--glsl-es-version" => {
                cli.options.glsl_es_version =
                    value(&mut i, arg)?.parse().context("--glsl-es-version")?;
            }
            "--hlsl-model" => {
                cli.options.hlsl_shader_model =
                    value(&mut i, arg)?.parse().context("--hlsl-model")?;
            }
            "--metal-version" => {
                cli.options.metal_version =
                    value(&mut i, arg)?.parse().context("--metal-version")?;
            }
            "--420pack" => cli.options.enable_420pack = true,
            "--no-decoration-binding" => cli.options.metal_decoration_binding = false,
            other if !other.starts_with('-') => {
                if cli.vertex_path.is_none() {
                    cli.vertex_path = Some(other.to_string());
                } else if cli.fragment_path.is_none() {
                    cli.fragment_path = Some(other.to_string());
                } else {
                    bail!("unexpected argument: {other}");
                }
            }
            other => bail!("unknown option: {other}"),
        }
        i += 1;
    }

    Ok(cli)
}

fn run(cli: &CliArgs) -> Result<bool> {
    let vertex_path = cli
        .vertex_path
        .as_deref()
        .context("both vertex and fragment shader paths are required")?;
    let fragment_path = cli
        .fragment_path
        .as_deref()
        .context("both vertex and fragment shader paths are required")?;

    let targets: Vec<TargetLanguage> = if cli.all_targets {
        TargetLanguage::ALL.to_vec()
    } else if cli.targets.is_empty() {
        bail!("no target specified; use --all or -t <target>");
    } else {
        cli.targets.clone()
    };

    let vertex_source = fs::read_to_string(vertex_path)
        .with_context(|| format!("cannot open file: {vertex_path}"))?;
    let fragment_source = fs::read_to_string(fragment_path)
        .with_context(|| format!("cannot open file: {fragment_path}"))?;

    prism_core::initialize();

    log::info!("compiling: {vertex_path} + {fragment_path}");
    log::info!("output: {} (prefix {})", cli.output_path, cli.prefix);

    let mut artifacts: Vec<(String, CompiledShader)> = Vec::new();
    let mut any_error = false;

    for &target in &targets {
        log::debug!("compiling to {target}");

        let compiled = [
            ("VertexShader", ShaderStage::Vertex, &vertex_source),
            ("FragmentShader", ShaderStage::Fragment, &fragment_source),
        ]
        .map(|(base, stage, source)| {
            let shader = prism_core::compile(source, stage, target, &cli.options);
            (format!("{base}_{}", target.suffix()), shader)
        });

        let mut target_failed = false;
        for (_, shader) in &compiled {
            if !shader.success {
                log::error!(
                    "error compiling {} shader to {target}:\n{}",
                    shader.stage,
                    shader.error_message()
                );
                target_failed = true;
            }
        }
        if target_failed {
            any_error = true;
            continue;
        }

        artifacts.extend(compiled);
    }

    let artifact_refs: Vec<(&str, &CompiledShader)> = artifacts
        .iter()
        .map(|(name, shader)| (name.as_str(), shader))
        .collect();
    let header = prism_core::generate_header(&artifact_refs, &cli.prefix, true);

    // Tear down before propagating so a failed write cannot leave the
    // runtime initialized.
    let written = fs::write(&cli.output_path, header)
        .with_context(|| format!("cannot write to file: {}", cli.output_path));
    prism_core::shutdown();
    written?;

    log::info!("generated: {}", cli.output_path);
    Ok(any_error)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if cli.help {
        print_usage();
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::TranslateError;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_collects_targets_and_options() {
        let cli = parse_args(&args(&[
            "-t",
            "msl",
            "-t",
            "glsl",
            "--glsl-version",
            "450",
            "--420pack",
            "-o",
            "out.h",
            "vert.glsl",
            "frag.glsl",
        ]))
        .unwrap();

        assert_eq!(
            cli.targets,
            vec![TargetLanguage::Metal, TargetLanguage::Glsl]
        );
        assert_eq!(cli.options.glsl_version, 450);
        assert!(cli.options.enable_420pack);
        assert_eq!(cli.output_path, "out.h");
        assert_eq!(cli.vertex_path.as_deref(), Some("vert.glsl"));
        assert_eq!(cli.fragment_path.as_deref(), Some("frag.glsl"));
    }

    #[test]
    fn test_parse_args_rejects_unknown_target() {
        assert!(parse_args(&args(&["-t", "wgsl"])).is_err());
    }

    #[test]
    fn test_failed_output_write_still_shuts_down_runtime() {
        let dir = std::env::temp_dir();
        let vertex_path = dir.join("prism_teardown_vert.glsl");
        let fragment_path = dir.join("prism_teardown_frag.glsl");
        fs::write(
            &vertex_path,
            "#version 450\nvoid main() { gl_Position = vec4(0.0); }",
        )
        .unwrap();
        fs::write(
            &fragment_path,
            "#version 450\nlayout(location = 0) out vec4 c;\nvoid main() { c = vec4(1.0); }",
        )
        .unwrap();

        let cli = CliArgs {
            vertex_path: Some(vertex_path.to_string_lossy().into_owned()),
            fragment_path: Some(fragment_path.to_string_lossy().into_owned()),
            output_path: "/nonexistent-prism-dir/out.h".to_string(),
            targets: vec![TargetLanguage::Spirv],
            ..CliArgs::default()
        };
        assert!(run(&cli).is_err());

        // The runtime must have been torn down on the error path, so a
        // fresh compile is back to the uninitialized failure.
        let shader = prism_core::compile(
            "#version 450\nvoid main() { gl_Position = vec4(0.0); }",
            ShaderStage::Vertex,
            TargetLanguage::Spirv,
            &CompileOptions::default(),
        );
        assert!(!shader.success);
        assert_eq!(shader.error, Some(TranslateError::Uninitialized));
    }
}
