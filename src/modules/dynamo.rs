use rusoto_core::{Region, RusotoError};
use rusoto_dynamodb::{DynamoDb, DynamoDbClient, AttributeValue, BatchWriteItemInput,
    WriteRequest, PutRequest, BatchWriteItemError};
use std::{fs::File, io::{BufWriter, Write}, collections::HashMap};
use chrono::Local;
use itertools::Itertools;
use super::config::{LOG_FILE_NAME, Config};
use super::error::{Error, Result};
use super::product::Product;

pub struct Dynamo {
    client: DynamoDbClient,
    config: Config,
    logger: Option<Box<dyn Write + Send>>,
}

impl Dynamo {

    // an unknown region fails here, before anything is written
    pub fn new(config: Config) -> Result<Dynamo> {
        let region: Region = config.region.parse()?;
        Dynamo::with_client(DynamoDbClient::new(region), config)
    }

    pub fn with_client(client: DynamoDbClient, config: Config) -> Result<Dynamo> {
        let logger: Option<Box<dyn Write + Send>> = if config.enable_log {
            Some(Box::new(BufWriter::new(File::create(LOG_FILE_NAME)?)))
        } else {
            None
        };

        Ok(Dynamo {
            client: client,
            config: config,
            logger: logger,
        })
    }

    // send request logs somewhere other than LOG_FILE_NAME
    pub fn with_logger(mut self, logger: Box<dyn Write + Send>) -> Dynamo {
        self.logger = Some(logger);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.config.table_name
    }

    // save all products into dynamoDB (multiple batches), returns the number written
    pub async fn save_to_dynamo(&mut self, products: &[Product]) -> Result<usize> {
        println!("Starting to upload {} products to {}:", products.len(), self.config.table_name);

        let mut success_count = 0;
        let result = self.all_batch_write(products, &mut success_count).await;

        if let Some(logger) = self.logger.as_mut() {
            match logger.flush() {
                Ok(_) => println!("Logs has been saved to {}", LOG_FILE_NAME),
                Err(error) => eprintln!("Cannot save logs: {}", error),
            }
        }

        result.map(|_| success_count)
    }

    // upload batches sequentially, the first failure stops the run
    async fn all_batch_write(&mut self, products: &[Product], success_count: &mut usize) -> Result<()> {
        let batch_count = (products.len() + self.config.batch_size - 1) / self.config.batch_size;

        for (i, batch) in products.chunks(self.config.batch_size).enumerate() {
            *success_count += self.batch_write(batch).await?;
            println!("Batch {}/{} written ({} items)", i + 1, batch_count, batch.len());
        }

        Ok(())
    }

    // one batch write, 25 products at most
    async fn batch_write(&mut self, products: &[Product]) -> Result<usize> {
        let write_requests: Vec<_> = products.iter().map(build_write_request).collect();

        let mut batch_items = HashMap::new();
        batch_items.insert(self.config.table_name.to_owned(), write_requests.clone());

        // this is the structure of DynamoDB BatchWriteItemInput
        let input = BatchWriteItemInput {
            request_items: batch_items,
            ..Default::default()
        };

        match self.client.batch_write_item(input).await {
            Ok(output) => {
                let unprocessed: Vec<WriteRequest> = output.unprocessed_items
                    .unwrap_or_default()
                    .into_iter()
                    .flat_map(|(_, requests)| requests)
                    .collect();

                self.log_requests(&write_requests, &unprocessed, None);

                if !unprocessed.is_empty() {
                    return Err(Error::Unprocessed { count: unprocessed.len() });
                }
                Ok(write_requests.len())
            },
            Err(error) => {
                self.log_requests(&write_requests, &[], Some(&error));
                Err(error.into())
            }
        }
    }

    // log failures go to stderr, the write result is returned unchanged
    fn log_requests(&mut self, requests: &[WriteRequest], unprocessed: &[WriteRequest],
        error: Option<&RusotoError<BatchWriteItemError>>) {
        if self.logger.is_none() {
            return;
        }

        if let Err(log_error) = self.write_batch_log(requests, unprocessed, error) {
            eprintln!("Cannot save logs: {}", log_error);
        }
    }

    // save a batch of requests to logs
    fn write_batch_log(&mut self, requests: &[WriteRequest], unprocessed: &[WriteRequest],
        error: Option<&RusotoError<BatchWriteItemError>>) -> Result<()> {
        // DynamoDB hands unprocessed requests back by key
        let unprocessed_ids: Vec<_> = unprocessed.iter()
            .filter_map(|request| request.put_request.as_ref())
            .filter_map(|put_request| put_request.item.get("id"))
            .collect();

        for request in requests {
            if let Some(put_request) = &request.put_request {
                let request_result = if error.is_some() {
                    "Failure"
                } else if put_request.item.get("id").map_or(false, |id| unprocessed_ids.contains(&id)) {
                    "Unprocessed"
                } else {
                    "Success"
                };

                let line = format!("{}: {}", request_result, item_to_json(&put_request.item)?);
                self.log_line(&line)?;
            }
        }

        if !unprocessed.is_empty() {
            self.log_line(&format!("Unprocessed items: {}", unprocessed.len()))?;
        }

        if let Some(error) = error {
            self.log_line(&format!("Error message: {}", error))?;
        }

        self.log_line("=====")
    }

    fn log_line(&mut self, text: &str) -> Result<()> {
        if let Some(logger) = self.logger.as_mut() {
            writeln!(logger, "{} {}", Local::now().to_rfc3339(), text)?;
        }
        Ok(())
    }
}

// build a single put request for a product
fn build_write_request(product: &Product) -> WriteRequest {
    WriteRequest {
        put_request: Some(PutRequest { item: product.to_item() }),
        ..Default::default()
    }
}

// serialise an item in DynamoDB Json format, sorted by attribute name
pub fn item_to_json(item: &HashMap<String, AttributeValue>) -> Result<String> {
    let v: Vec<_> = item.iter().sorted_by(|x, y| x.0.cmp(y.0)).collect();
    Ok(serde_json::to_string(&v)?)
}

// print every item instead of writing it
pub fn preview_items(products: &[Product]) -> Result<()> {
    for product in products {
        println!("{}", item_to_json(&product.to_item())?);
    }
    Ok(())
}
