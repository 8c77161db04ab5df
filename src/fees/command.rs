pub mod calculate_fee_cmd;
