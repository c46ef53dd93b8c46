use serde::Serialize;

#[derive(Serialize)]
pub struct ApiError<D> {
    pub detail: D,
}

#[derive(Serialize)]
pub struct ApiOk {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ApiHealth {
    pub status: &'static str,
}
