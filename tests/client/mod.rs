mod browse_test;
mod router_test;
mod store_test;
