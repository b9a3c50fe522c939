pub mod random_opponent;
