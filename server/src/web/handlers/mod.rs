// shopfront_server/src/web/handlers/mod.rs

pub mod order_handlers;
pub mod product_handlers;

#[cfg(test)]
pub(crate) mod test_support;
