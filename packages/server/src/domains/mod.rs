// Business domains
pub mod archaeologists;
pub mod auth;
pub mod figures;
pub mod kingdoms;
pub mod moderation;
pub mod objects;
pub mod research;
pub mod sites;
