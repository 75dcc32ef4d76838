/// Loaders are high level: they fetch the raw bytes through the io layer and validate them with the
/// format parsers, so the scene thread only ever sees usable models.
pub mod model_loader;
