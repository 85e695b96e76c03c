pub mod torus;
