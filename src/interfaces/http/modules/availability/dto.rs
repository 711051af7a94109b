use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// First night of the requested stay (YYYY-MM-DD)
    pub check_in: NaiveDate,
    /// Departure date, exclusive (YYYY-MM-DD)
    pub check_out: NaiveDate,
    /// Booking code whose own holds are ignored
    pub exclude_booking: Option<String>,
}
