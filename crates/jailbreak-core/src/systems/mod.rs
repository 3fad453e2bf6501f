pub mod damage;
pub mod enemy;
pub mod player;
pub mod win;
