pub mod test_data_helpers;
