use rusoto_dynamodb::AttributeValue;

pub fn build_string_attr(text: String) -> AttributeValue {
    AttributeValue {
        s: Some(text),
        ..Default::default()
    }
}

// numbers travel as strings in DynamoDB
pub fn build_number_attr(number: i64) -> AttributeValue {
    AttributeValue {
        n: Some(number.to_string()),
        ..Default::default()
    }
}

pub fn build_list_attr(list: Vec<AttributeValue>) -> AttributeValue {
    AttributeValue {
        l: Some(list),
        ..Default::default()
    }
}

// a list of strings, order is kept (unlike a string set)
pub fn build_string_list_attr(list: &[String]) -> AttributeValue {
    build_list_attr(list.iter().cloned().map(build_string_attr).collect())
}
