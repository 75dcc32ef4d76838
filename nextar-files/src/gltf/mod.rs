// https://registry.khronos.org/glTF/specs/2.0/glTF-2.0.html#asset
pub mod reader;
pub mod types;

#[cfg(test)]
mod tests;
