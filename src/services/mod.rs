pub mod place_data;
