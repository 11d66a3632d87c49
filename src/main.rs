use anyhow::{bail, Context, Result};
use clap::{App, Arg, ArgMatches};
use id3::evaluate::evaluate_dataset;
use id3::render::TreeDisplay;
use id3::{
    arff, best_tree_search, loader, persist, Allocation, BuildOptions, Dataset, ScanStrategy,
    ScoringRule, SearchOptions, SplitOptions,
};
use std::fs;

fn main() -> Result<()> {
    let env_filter = format!("{}=info", clap::crate_name!().replace("-", "_"));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(env_filter))
        .format_module_path(false)
        .format_timestamp(None)
        .init();

    let matches = App::new("id3")
        .version("1.0")
        .author("Pearce Keesling")
        .about("Induces ID3 decision trees from categorical data")
        .arg(Arg::with_name("file")
             .short("f")
             .long("file")
             .required(true)
             .takes_value(true))
        .arg(Arg::with_name("format")
             .long("format")
             .possible_values(&["csv", "arff"])
             .takes_value(true))
        .arg(Arg::with_name("header")
             .long("header")
             .help("the first line of a csv file names the columns"))
        .arg(Arg::with_name("delimiter")
             .long("delimiter")
             .default_value(",")
             .takes_value(true))
        .arg(Arg::with_name("target")
             .short("t")
             .long("target")
             .help("column to predict, defaults to the last one")
             .takes_value(true))
        .arg(Arg::with_name("validation")
             .short("v")
             .min_values(1)
             .max_values(2)
             .help("`random <percent>` to hold out rows, `training` to test on the training set")
             .takes_value(true))
        .arg(Arg::with_name("allocation")
             .long("allocation")
             .possible_values(&["per-class", "per-total"])
             .default_value("per-class")
             .takes_value(true))
        .arg(Arg::with_name("runs")
             .long("runs")
             .default_value("1")
             .takes_value(true))
        .arg(Arg::with_name("scoring")
             .long("scoring")
             .possible_values(&["accuracy", "efficiency"])
             .default_value("accuracy")
             .takes_value(true))
        .arg(Arg::with_name("min-accuracy")
             .long("min-accuracy")
             .help("percentage a tree must reach to be kept, overrides --scoring")
             .takes_value(true))
        .arg(Arg::with_name("scan")
             .long("scan")
             .possible_values(&["single", "per-attribute"])
             .default_value("single")
             .takes_value(true))
        .arg(Arg::with_name("seed")
             .long("seed")
             .takes_value(true))
        .arg(Arg::with_name("fail-fast")
             .long("fail-fast"))
        .arg(Arg::with_name("save")
             .long("save")
             .takes_value(true))
        .arg(Arg::with_name("load")
             .long("load")
             .help("evaluate a saved tree instead of training")
             .takes_value(true))
        .arg(Arg::with_name("render")
             .long("render")
             .short("r"))
        .get_matches();

    let data = load_dataset(&matches)?;
    if let Some(path) = matches.value_of("load") {
        let tree = persist::load_from_path(path).with_context(|| format!("loading {}", path))?;
        let evaluation =
            evaluate_dataset(&data, &tree).with_context(|| format!("evaluating {}", path))?;
        println!(
            "Valid: {}/{} ({:.2}%)",
            evaluation.correct,
            evaluation.total,
            evaluation.accuracy() * 100.0
        );
        if matches.is_present("render") {
            print!("{}", TreeDisplay(&tree));
        }
        return Ok(());
    }

    let options = search_options(&matches)?;
    let report = best_tree_search(&data, &options)?;
    let best = match report.best {
        Some(best) => best,
        None => {
            match options.scoring {
                ScoringRule::MinimumAccuracy(minimum) => println!(
                    "No tree found with a minimum accuracy of {:.2}%",
                    minimum * 100.0
                ),
                _ => println!("No tree found ({} failed runs)", report.failed),
            }
            return Ok(());
        }
    };
    println!(
        "Best of {} runs with {:.2}% of the dataset: {:.2}% accurate, average {:.2}%, {} nodes",
        options.runs,
        options.split.training_fraction.unwrap_or(1.0) * 100.0,
        best.accuracy * 100.0,
        report.average_accuracy.unwrap_or(0.0) * 100.0,
        best.node_count
    );
    if matches.is_present("render") {
        print!("{}", TreeDisplay(&best.tree));
    }
    if let Some(path) = matches.value_of("save") {
        persist::save_to_path(&best.tree, path).with_context(|| format!("saving {}", path))?;
    }
    Ok(())
}

fn load_dataset(matches: &ArgMatches<'_>) -> Result<Dataset> {
    let file = matches.value_of("file").unwrap_or_default();
    let contents = fs::read_to_string(file).with_context(|| format!("reading {}", file))?;
    let target = matches.value_of("target");
    let format = matches
        .value_of("format")
        .unwrap_or(if file.ends_with(".arff") { "arff" } else { "csv" });
    let data = if format == "arff" {
        arff::parse(&contents, target)?
    } else {
        let delimiter = match matches.value_of("delimiter").map(|d| d.chars().collect::<Vec<_>>()) {
            Some(ref chars) if chars.len() == 1 => chars[0],
            _ => bail!("delimiter must be a single character"),
        };
        loader::parse_delimited(&contents, delimiter, matches.is_present("header"), target)?
    };
    Ok(data)
}

fn search_options(matches: &ArgMatches<'_>) -> Result<SearchOptions> {
    let mut validation_values = matches.values_of("validation").into_iter().flatten();
    let training_fraction = match validation_values.next() {
        Some("random") => {
            let percent: f64 = validation_values
                .next()
                .context("random validation needs a training percentage")?
                .parse()
                .context("training percentage must be a number")?;
            Some(percent / 100.0)
        }
        Some("training") | None => None,
        Some(other) => bail!("unknown validation mode `{}`", other),
    };
    let allocation = match matches.value_of("allocation") {
        Some("per-total") => Allocation::PerTotal,
        _ => Allocation::PerClass,
    };
    let scoring = match (matches.value_of("min-accuracy"), matches.value_of("scoring")) {
        (Some(percent), _) => {
            let percent: f64 = percent.parse().context("minimum accuracy must be a number")?;
            ScoringRule::MinimumAccuracy(percent / 100.0)
        }
        (None, Some("efficiency")) => ScoringRule::Efficiency,
        _ => ScoringRule::Accuracy,
    };
    let scan = match matches.value_of("scan") {
        Some("per-attribute") => ScanStrategy::PerAttribute,
        _ => ScanStrategy::SingleScan,
    };
    let seed = match matches.value_of("seed") {
        Some(seed) => seed.parse().context("seed must be an integer")?,
        None => rand::random(),
    };
    Ok(SearchOptions {
        split: SplitOptions {
            training_fraction,
            allocation,
        },
        build: BuildOptions { scan },
        runs: matches
            .value_of("runs")
            .unwrap_or("1")
            .parse()
            .context("runs must be an integer")?,
        scoring,
        seed,
        fail_fast: matches.is_present("fail-fast"),
    })
}
