#[cfg(not(target_arch = "wasm32"))]
mod native {
    use clap::{Parser, Subcommand};
    use recipe_catalog::config::Settings;
    use recipe_catalog::db::{self, SqliteStore};
    use recipe_catalog::dom::MemoryDom;
    use recipe_catalog::page::Page;
    use recipe_catalog::{Catalog, Result};
    use serde_json::Value;
    use std::fs;
    use std::path::PathBuf;

    #[derive(Parser, Debug)]
    #[command(
        name = "recipe-catalog",
        version,
        about = "Preview and edit a recipe catalog outside the browser"
    )]
    struct Cli {
        /// SQLite file used as origin storage [env: RECIPE_CATALOG_DB]
        #[arg(long, global = true)]
        db: Option<PathBuf>,
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Print the stored recipes as JSON.
        List,
        /// Add a recipe the way the form does, from NAME=VALUE pairs.
        Add {
            #[arg(value_parser = parse_field, required = true)]
            fields: Vec<(String, String)>,
        },
        /// Append the recipes listed in a JSON array file.
        Seed { file: PathBuf },
        /// Clear the store.
        Reset,
        /// Write the catalog page as a static HTML document.
        Render {
            #[arg(long, short)]
            out: Option<PathBuf>,
            #[arg(long, default_value = "Recipe Catalog")]
            title: String,
        },
    }

    fn parse_field(arg: &str) -> std::result::Result<(String, String), String> {
        arg.split_once('=')
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", arg))
    }

    pub fn main() {
        let settings = Settings::from_env();
        pretty_env_logger::init();
        let cli = Cli::parse();
        if let Err(e) = run(cli, settings) {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }

    fn run(cli: Cli, settings: Settings) -> Result<()> {
        let database = cli.db.unwrap_or(settings.database);
        let mut store = SqliteStore::open(&database)?;

        match cli.command {
            Command::List => {
                let recipes = db::get_recipes_from_storage(&store);
                println!("{}", serde_json::to_string_pretty(&recipes)?);
            }
            Command::Add { fields } => {
                let page = Page::build(&MemoryDom, "Recipe Catalog")?;
                let mut catalog = Catalog::new(MemoryDom, page.listing.clone(), store);
                catalog.init()?;
                let record = catalog.submit(fields)?;
                let title = record.get("titleTxt").and_then(Value::as_str);
                println!("Added {}", title.unwrap_or("untitled recipe"));
            }
            Command::Seed { file } => {
                let json_str = fs::read_to_string(&file)?;
                let seeded: Vec<Value> = serde_json::from_str(&json_str)?;
                let mut recipes = db::get_recipes_from_storage(&store);
                recipes.extend(seeded);
                db::save_recipes_to_storage(&mut store, &recipes)?;
                println!("Finished seeding, {} recipes stored", recipes.len());
            }
            Command::Reset => {
                let page = Page::build(&MemoryDom, "Recipe Catalog")?;
                let mut catalog = Catalog::new(MemoryDom, page.listing.clone(), store);
                catalog.reset()?;
                println!("Cleared {:?}", database);
            }
            Command::Render { out, title } => {
                let page = Page::build(&MemoryDom, &title)?;
                let catalog = Catalog::new(MemoryDom, page.listing.clone(), store);
                let count = catalog.init()?;
                let html = page.to_html();
                match out {
                    Some(path) => {
                        fs::write(&path, html)?;
                        log::info!("Wrote {} cards to {:?}", count, path);
                    }
                    None => print!("{}", html),
                }
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
