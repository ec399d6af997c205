pub mod column_set;
