pub mod plane_coords;
