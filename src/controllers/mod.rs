//! Controladores HTTP

pub mod route_plan_controller;
