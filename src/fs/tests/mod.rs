#![cfg(test)]


mod links;
mod listing;
mod stat;
mod walk;
