//! Socrata query parameters.

/// Default page size for filtered queries.
pub const DEFAULT_LIMIT: u32 = 50_000;

/// Columns kept in the final extract.
pub const FINAL_COLUMNS: &str = "yearstart,yearend,locationabbr,locationdesc,topic,question,\
datavaluetype,datavalue,lowconfidencelimit,highconfidencelimit,datavalueunit";

/// Sort order of the final extract.
pub const FINAL_ORDER: &str = "yearstart,topic,question";

/// One request against the CDI resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocrataQuery {
    /// `locationabbr` equality filter.
    pub location: String,
    /// `$where` clause.
    pub filter: Option<String>,
    /// `$select` projection.
    pub select: Option<String>,
    /// `$order` clause.
    pub order: Option<String>,
    /// `$limit`.
    pub limit: u32,
}

impl SocrataQuery {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            filter: None,
            select: None,
            order: None,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Query-string pairs in a stable order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("locationabbr", self.location.clone())];
        if let Some(filter) = &self.filter {
            params.push(("$where", filter.clone()));
        }
        if let Some(select) = &self.select {
            params.push(("$select", select.clone()));
        }
        if let Some(order) = &self.order {
            params.push(("$order", order.clone()));
        }
        params.push(("$limit", self.limit.to_string()));
        params
    }
}

/// `yearstart >= <since>`.
pub fn since_filter(since: i32) -> String {
    format!("yearstart >= {since}")
}

/// `yearstart >= <since> AND datavaluetype = '<value>'`, quoting the value.
pub fn since_and_type_filter(since: i32, data_value_type: &str) -> String {
    format!(
        "{} AND datavaluetype = '{}'",
        since_filter(since),
        data_value_type.replace('\'', "''")
    )
}
