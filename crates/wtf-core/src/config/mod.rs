mod settings;

pub use settings::WtfConfig;
