//! pedgen CLI: synthetic pedigree generation
//!
//! Commands:
//!   pedgen generate: generate a pedigree and print / export it
//!   pedgen tables  : print the inheritance tables for an allele frequency
//!   pedgen demo    : generate one dominant and one recessive family
//!   pedgen help    : show usage

use pedgen::export::{write_ped_file, PedDelimiter, PedigreeGraph, PedigreeSnapshot};
use pedgen::genetics::{Genotype, InheritanceModel};
use pedgen::{generate_pedigree, GeneratorConfig, InheritanceMode, Pedigree, PedigreeError, Result};
use std::env;
use std::process;
use uuid::Uuid;

fn print_usage() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║        pedgen: Synthetic Pedigree Generator                  ║
║        Mendelian inheritance, founders to descendants        ║
╚══════════════════════════════════════════════════════════════╝

Usage: pedgen <command> [options]

Commands:
  generate [options]      Generate a pedigree and print it as a PED table
  tables   [alt_freq]     Show forward/reverse inheritance tables
  demo                    Generate a dominant and a recessive example family
  help                    Show this message

Generate options:
  --family <id>               Family ID (default: random FAM-xxxxxxxx)
  --mode <AD|AR>              Mode of inheritance (default: AD)
  --generations <n>           Number of generations (default: 3)
  --max-children <n>          Maximum children per couple (default: 3)
  --spouse-likelihood <p>     Chance a later child continues the line (default: 0.6)
  --backprop-likelihood <p>   Chance of inferring a spouse's parents (default: 0.25)
  --alt-freq <q>              Alternate allele frequency (default: 0.1)
  --no-affected-spouses       Spouses are always homozygous reference
  --seed <n>                  Seed for reproducible output
  --config <file>             Load parameters from a JSON config
  --delimiter <tab|space>     PED column separator (default: tab)
  --out <dir>                 Write <dir>/<family>.ped
  --json <file>               Write a JSON snapshot with checksum
  --dot <file>                Write a Graphviz DOT drawing

Examples:
  pedgen generate --family F1 --mode AR --generations 4 --seed 7
  pedgen generate --config family.json --out peds --dot f1.dot
  pedgen tables 0.05
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "generate" => cmd_generate(&args[2..]),
        "tables" => cmd_tables(&args[2..]),
        "demo" => cmd_demo(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("  Error: {}", e);
        process::exit(1);
    }
}

/// Output destinations requested on the command line
#[derive(Default)]
struct Outputs {
    delimiter: PedDelimiter,
    ped_dir: Option<String>,
    json: Option<String>,
    dot: Option<String>,
}

fn parse_value<T: std::str::FromStr>(flag: &'static str, value: Option<&String>) -> Result<T> {
    let raw = value.ok_or_else(|| invalid_flag(flag, "missing value"))?;
    raw.parse().map_err(|_| invalid_flag(flag, raw))
}

fn invalid_flag(flag: &str, detail: &str) -> PedigreeError {
    PedigreeError::InvalidArgument(format!("{}: {}", flag, detail))
}

fn parse_generate_args(args: &[String]) -> Result<(GeneratorConfig, Outputs)> {
    // a config file is the base layer, flags override it
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path = args.get(i + 1).ok_or_else(|| invalid_flag("--config", "missing value"))?;
            GeneratorConfig::load(path)?
        }
        None => GeneratorConfig {
            family_id: String::new(),
            ..GeneratorConfig::default()
        },
    };
    let mut outputs = Outputs::default();

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--family" => config.family_id = parse_value("--family", iter.next())?,
            "--mode" => {
                let raw: String = parse_value("--mode", iter.next())?;
                config.mode = raw.parse()?;
            }
            "--generations" => config.generation_count = parse_value("--generations", iter.next())?,
            "--max-children" => config.max_children = parse_value("--max-children", iter.next())?,
            "--spouse-likelihood" => {
                config.spouse_likelihood = parse_value("--spouse-likelihood", iter.next())?
            }
            "--backprop-likelihood" => {
                config.backprop_likelihood = parse_value("--backprop-likelihood", iter.next())?
            }
            "--alt-freq" => config.alt_allele_freq = parse_value("--alt-freq", iter.next())?,
            "--no-affected-spouses" => config.affected_spouse_allowed = false,
            "--seed" => config.seed = Some(parse_value("--seed", iter.next())?),
            "--config" => {
                iter.next();
            }
            "--delimiter" => {
                let raw: String = parse_value("--delimiter", iter.next())?;
                outputs.delimiter = raw.parse().map_err(|e: String| invalid_flag("--delimiter", &e))?;
            }
            "--out" => outputs.ped_dir = Some(parse_value("--out", iter.next())?),
            "--json" => outputs.json = Some(parse_value("--json", iter.next())?),
            "--dot" => outputs.dot = Some(parse_value("--dot", iter.next())?),
            other => return Err(invalid_flag(other, "unknown option")),
        }
    }

    if config.family_id.trim().is_empty() {
        config.family_id = format!("FAM-{}", &Uuid::new_v4().simple().to_string()[..8]);
    }
    Ok((config, outputs))
}

fn print_pedigree(pedigree: &Pedigree, delimiter: PedDelimiter) {
    println!("\n  {}", pedigree.summary());
    println!("  {}", "-".repeat(60));
    for line in pedigree.to_ped(delimiter).lines() {
        println!("  {}", line);
    }
}

fn write_outputs(pedigree: &Pedigree, config: &GeneratorConfig, outputs: &Outputs) -> Result<()> {
    if let Some(dir) = &outputs.ped_dir {
        let path = write_ped_file(pedigree, dir, outputs.delimiter)?;
        println!("  PED file  -> {}", path.display());
    }
    if let Some(path) = &outputs.json {
        let snapshot = PedigreeSnapshot::from_pedigree(pedigree, Some(config));
        snapshot.save(path)?;
        println!("  Snapshot  -> {} (sha256 {})", path, snapshot.short_checksum(16));
    }
    if let Some(path) = &outputs.dot {
        let graph = PedigreeGraph::from_pedigree(pedigree);
        std::fs::write(path, graph.to_dot(&format!("{} Pedigree", pedigree.family_id)))?;
        println!(
            "  DOT graph -> {} ({} nodes, {} edges)",
            path,
            graph.node_count(),
            graph.edge_count()
        );
    }
    Ok(())
}

fn cmd_generate(args: &[String]) -> Result<()> {
    let (config, outputs) = parse_generate_args(args)?;
    println!("\n  Config: {}", config.summary());
    let pedigree = generate_pedigree(&config)?;
    print_pedigree(&pedigree, outputs.delimiter);
    write_outputs(&pedigree, &config, &outputs)
}

fn cmd_tables(args: &[String]) -> Result<()> {
    let alt_freq: f64 = match args.first() {
        Some(_) => parse_value("alt_freq", args.first())?,
        None => 0.1,
    };
    let model = InheritanceModel::new(alt_freq)?;
    let hw = model.hardy_weinberg;

    println!("\n  Hardy-Weinberg genotype frequencies (q = {:.3})", alt_freq);
    println!("  {}", "=".repeat(50));
    println!("  0 (hom ref): {:.6}", hw.hom_ref);
    println!("  1 (het):     {:.6}", hw.het);
    println!("  2 (hom alt): {:.6}", hw.hom_alt);

    println!("\n  Forward: (father, mother) -> child [weight]");
    println!("  {}", "-".repeat(50));
    for p in Genotype::ALL {
        for m in Genotype::ALL {
            let outcomes: Vec<String> = model
                .forward(p, m)
                .iter()
                .map(|(g, w)| format!("{} [{}]", g, w))
                .collect();
            println!("  ({}, {}) -> {}", p, m, outcomes.join(", "));
        }
    }

    println!("\n  Reverse: child -> (father, mother) [population weight]");
    println!("  {}", "-".repeat(50));
    for child in Genotype::ALL {
        let pairs: Vec<String> = model
            .reverse(child)
            .iter()
            .map(|((p, m), w)| format!("({}, {}) [{:.2e}]", p, m, w))
            .collect();
        println!("  {} -> {}", child, pairs.join(", "));
    }
    Ok(())
}

fn cmd_demo() -> Result<()> {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║              pedgen: Demo                                    ║
║       Dominant and recessive families, seeded                ║
╚══════════════════════════════════════════════════════════════╝
"#
    );

    let families = [
        ("DEMO-AD", InheritanceMode::Dominant, 11),
        ("DEMO-AR", InheritanceMode::Recessive, 12),
    ];
    for (step, (family_id, mode, seed)) in families.into_iter().enumerate() {
        println!("Step {}: {} family...", step + 1, mode);
        println!("{}", "-".repeat(60));
        let config = GeneratorConfig {
            family_id: family_id.to_string(),
            mode,
            generation_count: 4,
            backprop_likelihood: 0.4,
            seed: Some(seed),
            ..GeneratorConfig::default()
        };
        let pedigree = generate_pedigree(&config)?;
        print_pedigree(&pedigree, PedDelimiter::Tab);

        let graph = PedigreeGraph::from_pedigree(&pedigree);
        println!(
            "  Graph: {} nodes, {} edges, {} roots, {} layers",
            graph.node_count(),
            graph.edge_count(),
            graph.roots().len(),
            graph.generation_layers().len()
        );
        println!(
            "  Checksum: {}\n",
            pedgen::export::pedigree_checksum(&pedigree)
        );
    }
    Ok(())
}
