use rusoto_dynamodb::AttributeValue;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs::File, io::{BufReader, Read}};
use super::attr::{build_number_attr, build_string_attr, build_string_list_attr};
use super::error::Result;

// price is in minor currency units, image urls are paths to static assets
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_urls: Vec<String>,
    pub category: String,
    pub stock: i64,
}

impl Product {

    // build the DynamoDB item, attribute names follow the serde names
    pub fn to_item(&self) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();
        item.insert("id".to_string(), build_string_attr(self.id.to_owned()));
        item.insert("name".to_string(), build_string_attr(self.name.to_owned()));
        item.insert("description".to_string(), build_string_attr(self.description.to_owned()));
        item.insert("price".to_string(), build_number_attr(self.price));
        item.insert("imageUrls".to_string(), build_string_list_attr(&self.image_urls));
        item.insert("category".to_string(), build_string_attr(self.category.to_owned()));
        item.insert("stock".to_string(), build_number_attr(self.stock));
        item
    }
}

// the built-in catalogue
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Ramo de Rosas con Fresas".to_string(),
            description: "Ramo de 24 rosas con 6 fresas decoradas".to_string(),
            price: 650,
            image_urls: image_urls(&[
                "/flowers/strawberrysFlowers.jpeg",
                "/flowers/strawberrysFlowers2.jpeg",
                "/flowers/strawberrysFlowers3.jpeg",
            ]),
            category: "Rosas".to_string(),
            stock: 10,
        },
        Product {
            id: "2".to_string(),
            name: "Caja de Rosas".to_string(),
            description: "Caja de 48 rosas en forma de corazon con fresas decoradas, con foto".to_string(),
            price: 900,
            image_urls: image_urls(&[
                "/flowers/cajaFlor.jpg",
                "/flowers/cajaFlor2.jpg",
                "/flowers/cajaFlor3.jpg",
            ]),
            category: "Rosas".to_string(),
            stock: 5,
        },
        Product {
            id: "3".to_string(),
            name: "Globo Burbuja".to_string(),
            description: "Globo personalizado de 2 colores y texto a eleccion".to_string(),
            price: 550,
            image_urls: image_urls(&[
                "/flowers/globoBurbuja.jpg",
                "/flowers/globoBurbuja2.jpg",
                "/flowers/globoBurbuja3.jpg",
            ]),
            category: "Globo".to_string(),
            stock: 7,
        },
    ]
}

fn image_urls(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|x| x.to_string()).collect()
}

// read products from a json file, the file holds an array of products
pub fn load_products(filename: &str) -> Result<Vec<Product>> {
    let file = File::open(filename)?;
    read_products(BufReader::new(file))
}

pub fn read_products<R: Read>(reader: R) -> Result<Vec<Product>> {
    Ok(serde_json::from_reader(reader)?)
}
