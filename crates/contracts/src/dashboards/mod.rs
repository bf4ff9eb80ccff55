pub mod d400_car_statistics;
