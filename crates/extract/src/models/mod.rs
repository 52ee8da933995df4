mod version;

pub use self::version::ModVersion;
