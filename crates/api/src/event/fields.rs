/// The four fields every stored event must carry
#[derive(Debug, Clone, PartialEq)]
pub struct MandatoryFields {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
}

impl MandatoryFields {
    /// Fails with the name of the first missing field. A `null` counts as missing.
    pub fn require(
        title: Option<String>,
        description: Option<String>,
        start_time: Option<String>,
        end_time: Option<String>,
    ) -> Result<Self, &'static str> {
        Ok(Self {
            title: title.ok_or("title")?,
            description: description.ok_or("description")?,
            start_time: start_time.ok_or("start_time")?,
            end_time: end_time.ok_or("end_time")?,
        })
    }
}
