// src/intraday_info.rs

#[derive(Clone)]
pub struct IntradayInfo {
    pub symbol: String,
    pub begin_year: i32,
    /// Exclusive.
    pub end_year: i32,
}

impl IntradayInfo {
    pub fn create_infos(symbols: Vec<String>, begin_year: i32, end_year: i32) -> Vec<Self> {
        symbols
            .into_iter()
            .map(|symbol| IntradayInfo {
                symbol,
                begin_year,
                end_year,
            })
            .collect()
    }

    pub fn years(&self) -> std::ops::Range<i32> {
        self.begin_year..self.end_year
    }
}
