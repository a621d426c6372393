use clap::{clap_app, ArgMatches};
use std::env;
use super::error::{Error, Result};

pub struct Config {
    pub region: String,
    pub table_name: String,
    pub batch_size: usize,
    pub enable_log: bool,

    /*
        option: products_file
        default: None
        effect: when set, products are read from this JSON file (an array of
        objects with camelCase keys) instead of the built-in seed list
    */
    pub products_file: Option<String>,

    /*
        option: dry_run
        default: false
        effect: print the items in DynamoDB JSON format and stop before
        any client is created
    */
    pub dry_run: bool,
}

pub const LOG_FILE_NAME: &str = "dynamodb_logs.txt";
pub const BATCH_SIZE_MIN: usize = 1;
pub const BATCH_SIZE_MAX: usize = 25;
pub const BATCH_SIZE_DEFAULT: &str = "25";

// parse the process arguments, clap prints usage and exits on error
pub fn get_arguments() -> Result<Config> {
    match parse_arguments(env::args()) {
        Ok(matches) => config_from_matches(&matches),
        Err(error) => error.exit(),
    }
}

pub fn parse_arguments<I, T>(args: I) -> std::result::Result<ArgMatches<'static>, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    clap_app!(x =>
        (name: "Seed_Products")
        (version: "0.1.0")
        (about: "Seed the product catalogue into a DynamoDB table")
        (@arg TABLE: -t --table +required +takes_value "Specify DynamoDB table name")
        (@arg REGION: -r --region +required +takes_value "Specify AWS region. E.g. ap-southeast-2, ca-central-1, eu-north-1, sa-east-1, us-west-1, cn-north-1, etc.")
        (@arg FILE: -f --file +takes_value "Read products from a JSON file instead of the built-in list")
        (@arg BATCH_SIZE: -s --size +takes_value "Specify batch size between 1 and 25. Default 25")
        (@arg DRY_RUN: -d --dryrun "Print the items without writing them")
        (@arg NO_LOG: -n --nolog "Do not log requests and error messages")
    )
    .get_matches_from_safe(args)
}

pub fn config_from_matches(matches: &ArgMatches) -> Result<Config> {
    let batch_size = matches.value_of("BATCH_SIZE")
        .unwrap_or(BATCH_SIZE_DEFAULT);
    let batch_size = batch_size.parse()
        .map_err(|_| Error::InvalidArgument(format!("batch size {} is not a valid number", batch_size)))?;

    Ok(Config {
        region: matches.value_of("REGION").unwrap_or_default().to_string(),
        table_name: matches.value_of("TABLE").unwrap_or_default().to_string(),
        batch_size: check_range(batch_size, BATCH_SIZE_MIN, BATCH_SIZE_MAX)?,
        enable_log: !matches.is_present("NO_LOG"),
        products_file: matches.value_of("FILE").map(str::to_string),
        dry_run: matches.is_present("DRY_RUN"),
    })
}

pub fn check_range(input: usize, lower_bound: usize, upper_bound: usize) -> Result<usize> {
    if input < lower_bound || input > upper_bound {
        return Err(Error::InvalidArgument(format!(
            "{} is not between {} and {}",
            input, lower_bound, upper_bound
        )));
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ErrorKind;

    fn config(args: &[&str]) -> Result<Config> {
        let matches = parse_arguments(args).expect("arguments should parse");
        config_from_matches(&matches)
    }

    #[test]
    fn reads_table_and_region() {
        let config = config(&["seed", "--table", "products", "--region", "us-east-1"]).unwrap();

        assert_eq!(config.table_name, "products");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.batch_size, 25);
        assert!(config.enable_log);
        assert!(!config.dry_run);
        assert!(config.products_file.is_none());
    }

    #[test]
    fn reads_short_flags_and_options() {
        let config = config(&[
            "seed", "-t", "products", "-r", "eu-west-1", "-s", "1", "-f", "products.json", "-n", "-d",
        ]).unwrap();

        assert_eq!(config.batch_size, 1);
        assert_eq!(config.products_file.as_deref(), Some("products.json"));
        assert!(!config.enable_log);
        assert!(config.dry_run);
    }

    #[test]
    fn missing_table_is_a_usage_error() {
        let error = parse_arguments(&["seed", "--region", "us-east-1"]).err().unwrap();
        assert_eq!(error.kind, ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn missing_region_is_a_usage_error() {
        let error = parse_arguments(&["seed", "--table", "products"]).err().unwrap();
        assert_eq!(error.kind, ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn batch_size_out_of_range() {
        let result = config(&["seed", "-t", "products", "-r", "us-east-1", "-s", "26"]);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let result = config(&["seed", "-t", "products", "-r", "us-east-1", "-s", "0"]);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn batch_size_not_a_number() {
        let result = config(&["seed", "-t", "products", "-r", "us-east-1", "-s", "many"]);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}
