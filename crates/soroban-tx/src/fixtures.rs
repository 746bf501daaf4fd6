//! Shared test data

/// Protocol-20 envelope invoking `join_pool` on a testnet comet pool, signed
/// by its source account.
pub const JOIN_POOL_ENVELOPE: &str = "AAAAAgAAAAB/m3Gd2f4Prkc5mvVnWAMsXFuq18mO6rFiiSfrkfEAWQAG4GAAAIM/AAAAWwAAAAEAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAEAAAAAAAAAGAAAAAAAAAABuLOIaAaK2XieV4UrQETLmq0JVyrmNXg+Egt1YIZiLacAAAAJam9pbl9wb29sAAAAAAAAAwAAAAoAAAAAAAAAAAAAAOjUpRAAAAAAEAAAAAEAAAACAAAACgAAAAAAAAAAAAAJGqJ+hAAAAAAKAAAAAAAAAAAAAAA6NcHagAAAABIAAAAAAAAAAH+bcZ3Z/g+uRzma9WdYAyxcW6rXyY7qsWKJJ+uR8QBZAAAAAQAAAAAAAAAAAAAAAbiziGgGitl4nleFK0BEy5qtCVcq5jV4PhILdWCGYi2nAAAACWpvaW5fcG9vbAAAAAAAAAMAAAAKAAAAAAAAAAAAAADo1KUQAAAAABAAAAABAAAAAgAAAAoAAAAAAAAAAAAACRqifoQAAAAACgAAAAAAAAAAAAAAOjXB2oAAAAASAAAAAAAAAAB/m3Gd2f4Prkc5mvVnWAMsXFuq18mO6rFiiSfrkfEAWQAAAAAAAAABAAAAAAAAAAUAAAAGAAAAAapP5zAt/ZBU77WhOGcGQgp2/m1qxylrvk56/wcS25MkAAAAFAAAAAEAAAAGAAAAAbiziGgGitl4nleFK0BEy5qtCVcq5jV4PhILdWCGYi2nAAAAEAAAAAEAAAABAAAADwAAAAtBbGxUb2tlblZlYwAAAAABAAAABgAAAAG4s4hoBorZeJ5XhStARMuarQlXKuY1eD4SC3VghmItpwAAABQAAAABAAAABgAAAAHQfc3fIc3mKWfUwZp3Q31UPu6iBwe0v66S+TU7zgtPIwAAABQAAAABAAAAB88GmZfMlWd8jthdZ1R9wpG0UCc7DKiUDq6heruLF6laAAAACQAAAAEAAAAAf5txndn+D65HOZr1Z1gDLFxbqtfJjuqxYokn65HxAFkAAAABQkxORAAAAAAqHq40QJgiUPwd1puHNo5mvaZNawfRSbr+z4jQje7OiwAAAAEAAAAAf5txndn+D65HOZr1Z1gDLFxbqtfJjuqxYokn65HxAFkAAAABVVNEQwAAAAAqHq40QJgiUPwd1puHNo5mvaZNawfRSbr+z4jQje7OiwAAAAYAAAABqk/nMC39kFTvtaE4ZwZCCnb+bWrHKWu+Tnr/BxLbkyQAAAAQAAAAAQAAAAIAAAAPAAAACUFsbG93YW5jZQAAAAAAABEAAAABAAAAAgAAAA8AAAAEZnJvbQAAABIAAAAAAAAAAH+bcZ3Z/g+uRzma9WdYAyxcW6rXyY7qsWKJJ+uR8QBZAAAADwAAAAdzcGVuZGVyAAAAABIAAAABuLOIaAaK2XieV4UrQETLmq0JVyrmNXg+Egt1YIZiLacAAAAAAAAABgAAAAGqT+cwLf2QVO+1oThnBkIKdv5tascpa75Oev8HEtuTJAAAABAAAAABAAAAAgAAAA8AAAAHQmFsYW5jZQAAAAASAAAAAbiziGgGitl4nleFK0BEy5qtCVcq5jV4PhILdWCGYi2nAAAAAQAAAAYAAAABuLOIaAaK2XieV4UrQETLmq0JVyrmNXg+Egt1YIZiLacAAAAQAAAAAQAAAAEAAAAPAAAADUFsbFJlY29yZERhdGEAAAAAAAABAAAABgAAAAG4s4hoBorZeJ5XhStARMuarQlXKuY1eD4SC3VghmItpwAAABAAAAABAAAAAgAAAA8AAAAHQmFsYW5jZQAAAAASAAAAAAAAAAB/m3Gd2f4Prkc5mvVnWAMsXFuq18mO6rFiiSfrkfEAWQAAAAEAAAAGAAAAAbiziGgGitl4nleFK0BEy5qtCVcq5jV4PhILdWCGYi2nAAAAEAAAAAEAAAABAAAADwAAAAtUb3RhbFNoYXJlcwAAAAABAAAABgAAAAHQfc3fIc3mKWfUwZp3Q31UPu6iBwe0v66S+TU7zgtPIwAAABAAAAABAAAAAgAAAA8AAAAJQWxsb3dhbmNlAAAAAAAAEQAAAAEAAAACAAAADwAAAARmcm9tAAAAEgAAAAAAAAAAf5txndn+D65HOZr1Z1gDLFxbqtfJjuqxYokn65HxAFkAAAAPAAAAB3NwZW5kZXIAAAAAEgAAAAG4s4hoBorZeJ5XhStARMuarQlXKuY1eD4SC3VghmItpwAAAAAAAAAGAAAAAdB9zd8hzeYpZ9TBmndDfVQ+7qIHB7S/rpL5NTvOC08jAAAAEAAAAAEAAAACAAAADwAAAAdCYWxhbmNlAAAAABIAAAABuLOIaAaK2XieV4UrQETLmq0JVyrmNXg+Egt1YIZiLacAAAABAaHMgQAAm/QAAAe4AAAAAAAAJWIAAAABkfEAWQAAAECEgd+5Bqo+pQmxF4cnUMGI2wGyEN43yZJNdQ/oRFddt8Yw6O7lXKRqnu4BgHIqqG5VQK3N/w6c3VV4SAJtCxoE";

pub const JOIN_POOL_SOURCE: &str = "GB7ZW4M53H7A7LSHHGNPKZ2YAMWFYW5K27EY52VRMKESP24R6EAFT7OJ";

/// Hash of [`JOIN_POOL_ENVELOPE`] under the testnet passphrase
pub const JOIN_POOL_HASH: &str = "cb3cd1212271826a0374e017e402893513ca4ad4356159f87ed036daf9c38546";
