pub mod effortcast_env;
pub mod stub_service;
