pub mod orders_testkit;
