use crate::utils::qr_encoder::QrEncoder;

pub struct AppState {
    pub encoder: QrEncoder,
}
