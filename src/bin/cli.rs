use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use regionmap::battery::write_battery;
use regionmap::png::RegionImage;
use regionmap::{
    BatteryParameters, DEFAULT_GROWTH_BIAS, GeneratedMap, GridStyle, MapParameters,
    adjacency_to_string, generate_battery, grid_to_string,
};
use std::path::PathBuf;

/// Генератор карт регионов для инструмента проверки
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Карта в «красивом» формате: `[[1, 1],\n[2, 3]]`
    Map(MapArgs),
    /// Карта в компактном многострочном формате: `[[1,1],\n[2,3]]`
    Single(MapArgs),
    /// Компактная карта и список смежности регионов
    Adjacency(MapArgs),
    /// Серия карт, записанная в каталог
    Battery(BatteryArgs),
}

#[derive(Args, Debug)]
struct MapArgs {
    /// Ширина карты (> 0)
    width: Option<u32>,

    /// Высота карты (> 0)
    height: Option<u32>,

    /// Склонность регионов к росту [1, 100]
    growth_bias: Option<u32>,

    /// Сид генератора (по умолчанию случайный)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Путь к конфигурационному файлу в формате TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Сохранить карту как PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Размер клетки в PNG, пикселей
    #[arg(long, default_value_t = 16)]
    cell_size: u32,

    /// Сохранить карту и смежность в JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BatteryArgs {
    /// Количество карт в серии (> 0)
    number_of_maps: Option<usize>,

    #[arg(long, default_value_t = 10)]
    width: u32,

    #[arg(long, default_value_t = 10)]
    height: u32,

    #[arg(long, default_value_t = DEFAULT_GROWTH_BIAS)]
    growth_bias: u32,

    /// Базовый сид серии: карта `i` получает сид `seed + i`
    #[arg(short, long)]
    seed: Option<u64>,

    /// Путь к конфигурационному файлу серии в формате TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Каталог для `map_<i>.txt` и `adj_<i>.txt`
    #[arg(short, long, default_value = "maps")]
    output: PathBuf,
}

impl MapArgs {
    fn parameters(&self) -> Result<MapParameters> {
        let mut params = match &self.config {
            Some(path) => MapParameters::from_toml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => {
                let (Some(width), Some(height)) = (self.width, self.height) else {
                    anyhow::bail!("<WIDTH> and <HEIGHT> are required without --config");
                };
                MapParameters::new(
                    width,
                    height,
                    self.growth_bias.unwrap_or(DEFAULT_GROWTH_BIAS),
                )
            }
        };
        if let Some(seed) = self.seed {
            params.seed = Some(seed);
        }
        params.validate()?;
        Ok(params)
    }
}

impl BatteryArgs {
    fn parameters(&self) -> Result<BatteryParameters> {
        let mut params = match &self.config {
            Some(path) => BatteryParameters::from_toml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => BatteryParameters {
                number_of_maps: self
                    .number_of_maps
                    .context("<NUMBER_OF_MAPS> is required without --config")?,
                map: MapParameters::new(self.width, self.height, self.growth_bias),
            },
        };
        if let Some(seed) = self.seed {
            params.map.seed = Some(seed);
        }
        params.validate()?;
        Ok(params)
    }
}

fn run_single(args: &MapArgs, render: impl Fn(&GeneratedMap) -> String) -> Result<()> {
    let params = args.parameters()?;
    let map = GeneratedMap::generate(0, &params)?;
    info!(
        "Generated {}x{} map: {} regions, seed {}",
        params.width,
        params.height,
        map.grid.region_count(),
        map.seed
    );

    println!("{}", render(&map));

    if let Some(path) = &args.png {
        RegionImage::new(&map.grid, args.cell_size).save_as_png(path, map.seed)?;
        info!("Saved PNG to {}", path.display());
    }
    if let Some(path) = &args.json {
        std::fs::write(path, map.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved JSON to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Map(args) => run_single(args, |map| grid_to_string(&map.grid, GridStyle::Pretty)),
        Command::Single(args) => run_single(args, |map| {
            grid_to_string(&map.grid, GridStyle::Compact { multiline: true })
        }),
        Command::Adjacency(args) => run_single(args, |map| {
            format!(
                "{}\n{}",
                grid_to_string(&map.grid, GridStyle::Compact { multiline: false }),
                adjacency_to_string(&map.adjacency)
            )
        }),
        Command::Battery(args) => {
            let params = args.parameters()?;
            let maps = generate_battery(&params)?;
            let written = write_battery(&maps, &args.output)?;
            info!(
                "Wrote {} files for {} maps to {}",
                written.len(),
                maps.len(),
                args.output.display()
            );
            Ok(())
        }
    }
}
