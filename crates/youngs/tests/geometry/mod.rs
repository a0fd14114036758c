mod cell_scenarios;
mod mesh_reconstruction;
mod random_cells;
mod volume_conservation;
