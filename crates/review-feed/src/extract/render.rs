use super::ReviewCard;

const CSV_HEADER: [&str; 6] = ["id", "rating", "type", "location", "content", "time"];

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to serialise reviews as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write reviews as CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Two-space indented JSON array; `[]` when nothing was accepted.
pub fn to_pretty_json(reviews: &[ReviewCard]) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(reviews)?)
}

/// Header row is always written, even for an empty feed.
pub fn to_csv(reviews: &[ReviewCard]) -> Result<String, RenderError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for review in reviews {
        writer.serialize(review)?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn summary_line(total: usize) -> String {
    format!("Total reviews extracted: {total}")
}
