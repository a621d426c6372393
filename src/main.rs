use std::process::exit;
use modules::config::{get_arguments, Config};
use modules::dynamo::{Dynamo, preview_items};
use modules::error::Result;
use modules::product::{load_products, seed_products, Product};

mod modules;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {}", error);
        exit(1);
    }
}

async fn run() -> Result<()> {
    let config = get_arguments()?;
    run_with(config).await.map(|_| ())
}

// returns the number of products written, dry runs and empty lists write none
async fn run_with(config: Config) -> Result<usize> {
    let products = select_products(&config)?;

    if products.is_empty() {
        println!("No products to seed, exiting...");
        return Ok(0);
    }

    if config.dry_run {
        println!("Dry run, {} items in DynamoDB Json format:", products.len());
        preview_items(&products)?;
        return Ok(0);
    }

    let mut client = Dynamo::new(config)?;
    let count = client.save_to_dynamo(&products).await?;

    println!("{}", completion_message(count, client.table_name()));
    Ok(count)
}

// the json file when one is given, otherwise the built-in list
fn select_products(config: &Config) -> Result<Vec<Product>> {
    match &config.products_file {
        Some(filename) => {
            println!("Reading products from {}...", filename);
            load_products(filename)
        },
        None => Ok(seed_products()),
    }
}

fn completion_message(count: usize, table_name: &str) -> String {
    format!("Seed complete. Inserted {} products in table {}", count, table_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::error::Error;
    use std::{env, fs, path::PathBuf};

    // a region rusoto rejects, reaching Dynamo::new fails the run
    fn config(products_file: Option<String>, dry_run: bool) -> Config {
        Config {
            region: "moon-north-1".to_string(),
            table_name: "flower-shop-products".to_string(),
            batch_size: 25,
            enable_log: false,
            products_file: products_file,
            dry_run: dry_run,
        }
    }

    fn write_products_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("seed_products_{}_{}.json", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn completion_message_names_count_and_table() {
        let message = completion_message(seed_products().len(), "flower-shop-products");
        assert_eq!(message, "Seed complete. Inserted 3 products in table flower-shop-products");
    }

    #[tokio::test]
    async fn dry_run_stops_before_the_client() {
        assert_eq!(run_with(config(None, true)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn real_run_reaches_the_client() {
        let result = run_with(config(None, false)).await;
        assert!(matches!(result, Err(Error::InvalidRegion(_))));
    }

    #[tokio::test]
    async fn empty_product_file_stops_before_the_client() {
        let path = write_products_file("empty", "[]");
        let result = run_with(config(Some(path.to_string_lossy().into_owned()), false)).await;
        fs::remove_file(&path).unwrap();

        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn built_in_list_without_a_file() {
        assert_eq!(select_products(&config(None, false)).unwrap(), seed_products());
    }

    #[test]
    fn product_file_replaces_the_built_in_list() {
        let path = write_products_file("one", r#"[{
            "id": "9",
            "name": "Tulipanes",
            "description": "Ramo de 12 tulipanes",
            "price": 480,
            "imageUrls": ["/flowers/tulipanes.jpg"],
            "category": "Tulipanes",
            "stock": 3
        }]"#);
        let products = select_products(&config(Some(path.to_string_lossy().into_owned()), false));
        fs::remove_file(&path).unwrap();

        let products = products.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Tulipanes");
    }
}
