mod astar;

pub use astar::space_time_a_star;
