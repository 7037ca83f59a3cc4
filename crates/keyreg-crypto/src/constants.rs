//! # Permutation Round Constants
//!
//! Fixed round constants and internal-matrix diagonal for the width-4
//! sponge permutation over the BN254 scalar field. Values are
//! nothing-up-my-sleeve: each is the SHA-256 output of a domain tag and a
//! 32-bit counter, reduced into the field.
//!
//! These tables are part of the identifier wire contract. Changing any
//! entry silently invalidates every previously derived identifier — the
//! golden vector test in `identity.rs` exists to catch exactly that.

pub(crate) const EXTERNAL_ROUND_CONSTANTS: [[&str; 4]; 8] = [
    [
        "184bd6c9a242c6bd621ddfd49844b1e74e829c4672a3dfb71e3794d7ebe7b5e3",
        "2f82ad60668b355ad14e8ff9d292bd9ed7b58538598fb35e89d662590a8123e9",
        "0b3d5f71eabf69832996f6d2a465d48c0ee4324af21fa6abc7a3aee8be9a44ab",
        "17b564a6439ca0ee947e8a95c75dc354fe5422ecfc241283cd1fc4a9e111bdda",
    ],
    [
        "176e0ed51f758a5a1d9e999d7516543df1e2b1369dabc64cafba6c87464055b5",
        "2f3648622375129aaf3a545d0238c4beffb091ea3b8dd7101fd70886e64e5c72",
        "0c9d08b92d6a2f61dab7246ebb0d370d559891f6cb5ad560b35dc7980c8b82d2",
        "21549ba6099613b9494c9fd0d3d57bcdb2d9b653718b54347f21f934fa89ff49",
    ],
    [
        "1d63502538cd8036834294c95c1e828ece7b63d392daef6aa7919f987f4b990e",
        "15ec798534306fbbeb66da61e6b5415c10d562542b5deb93b543ad735ad2f51b",
        "2042bde2ea873a336059488a9b5430f00f8ad11566754367614e598bd18a9b5e",
        "1d7dacacc18279b6ce31160a6ecf4a7ff147a1773c3931efbf0fae9ba716f492",
    ],
    [
        "27c0e8c0c723f5194c16036e4a77bd07a467ae39a55ce1d1ddbc51ad06aee214",
        "29b4f0e063dfdc951b356e332b48c9d9d5bdf072b76d81ad50a48d90082542bc",
        "00f07c6c848237a09f9a3bce1576fa9e63eda28fddd9657883528adf62ff50c0",
        "22283adbaa26287f124c3b2a09e61b5f904d3e1222f34a37f9868719c2d8ad42",
    ],
    [
        "0c9e3f808cb010b0d119db20d004cab43022e27559f02f14dd5fc2f1998491e0",
        "1525c1aae34a6e7aa4c2bf5f65558073b790e27ef2f295a496ec5e45cbe57633",
        "2bb021c5ee580674d98e4f841b904cd1b6098247ab9b611fd009ddbe2cca95d7",
        "02759e925eead011ceea352d2871ad3211ce6e30c0e8a00ad52a25bdd392905a",
    ],
    [
        "0fb877c394036d1f29d34e7ca83860d77ba4ddae5f4f79ca7c370ded85101820",
        "03853b321d85a6cfcf5865b071629882833fe6afc8dfb9f18115284e77427859",
        "0a79459f2e4aff749cab9e0a91161cd4477fc730eb0049c23aa1922007a4fbb3",
        "0bbb847c3a2ad3766377598e35622ec3ad8dfc5895920f8613735b730f4cbca6",
    ],
    [
        "081e88aad3eb3b2c189f22f830b06cf321ea66cf5b3d15f53a3360ffde61bb8e",
        "10ad534a78aafb4f220fbc6fd495048427b865a0580b82986e82ae3b53fe1ec8",
        "069b5e6335b1845750151fe5113c61b55bcc1fe286460117b31dda9be3f75a43",
        "0a3547b470214fcd6437b0713bd8e5c409c5d5c69d3eeb0da647fe18d0a8d337",
    ],
    [
        "114301c613207f3489e1f14abaa225b09ce285fe4fb204f230435369cc205599",
        "22671e671bf5c577498bf29aa0f938624b2938f176ac32b834c705517158e598",
        "041cb7ba89fdb302dfc1d04a317d859a0029636b25ab22dba38e67f546265cf1",
        "042ab256e26b1ab50fd856a19c2c16b2d094d83e856f7777c14c38d4c697d2ad",
    ],
];

pub(crate) const INTERNAL_ROUND_CONSTANTS: [&str; 56] = [
    "1b6257df3031c55cd347c6950f8d22dd6f55e2372cfa388e09a50e87074babd0",
    "276c8e8b0172f1dfb64107c1830733b7361c271ce16974731e5520090763339f",
    "03e828d6bbf64eb407d3e14cdbcf2e51b3e5efa759894a444faa9d6c5c915400",
    "174ce0f5194ae899d31cafbd76b22a31251666c89a6ee1891fa6e12a977bb3b1",
    "2c346c36e607d057df4559b62ffce5a68c4d5df0a95fa0907e39868c7224cc7e",
    "013db716baa2a2c7cdb7bd0d9e09b2a31064400f4fad5ff1c241188857fec964",
    "0cf23616276dedf5b114ca6c1040b32d2df63b75796fca3463a83db0d2e0b3de",
    "213badf6d7b60537eb3df229842342cff2839e8cd308a5a7a0334e10d57975c2",
    "2b37b58167e895a95d48e5d568547e43102bdaa81a44198be2cc90636e46adfa",
    "24f9e6acec68e77b9d712a45fc0fb4e025c3eae0b581c22abf8bfe4c683db452",
    "0ec6057ea32b46ab26656f1cff10a39de0234777edd48a063e98f3cb84f7dc60",
    "246c7cdf8eb83201197de222b55609553261e2fe4bbf57cc8a9324321de3e211",
    "07b54f7b25aa4be07d0512fe64051dc3cc62b1caf49443a3aa73f87ba310014d",
    "171a7a47e4847e85e3484ee71918c2507647db48a7166c9202b78ff3517776cc",
    "1e06d06723cd059d73d234f42573d6589035451ce32f1517854436ea44b072b7",
    "08011d9a43228e8a2056304b9d77c3c7ec3fe81de8a73489e084f3306690ad5f",
    "2ee0501737d05d98afb09205e97744bae75d94f3fe08a030ab86b05ae423c878",
    "26767e4cb41e9021bd14bc119673ecb09dfa94e4161a54c2f87fee3f789162a4",
    "2dd77183cdf0156afcde8199b663bd6a17d9c78de9ba7936741c9e3817e61cd0",
    "2d4b17632875790c1b1b77b046bfc34c1a62f46e28db0dc31484301536781647",
    "0d9cf96d669e462621a120268e612b49991321b5ca3963efa2426327ac0fb514",
    "2f207e602bbb25356672795fc1e86b023c18df51b45c43f6f3612ec1480e31b1",
    "0a06db8b1ee74e0a3277c030172bd9516e27889740c8cb2627313ea29e7cf093",
    "175e8887d073c3f3fbe4a3f966303e5dec042194a7b2933cbe414ef5fe9145a6",
    "01d39445b2b775279119da3da56b7608ed928b733fbbda63ffc14128562bd46d",
    "06b9310e977248bbb9a5ade7ef0759bd198c859b82af2864cfb6c42789f7d8ef",
    "1388cccbc96f5024e61de6eb274fa9b1793b245f77181adcae3c36c218837819",
    "2e9610943c290615c63df4f83820b095285c372f20ffd68b998c1df0a83304f9",
    "27c2d1adeb902f15635c2da472d42118f45026b76e6ed81cffe4594c46d1d749",
    "1b01c991966e89ab80d7658aa4e6c7b78dacafd160d977c206d251c7f41c3268",
    "080aada4af8c2512f9fca5d4fbe5d40677c6845e26cafa235cc3eed9d703aeba",
    "0d3e4b14119745f0f931f442dfcb2cbf6e5f95d536a435cede8deb5078e15309",
    "246feaf8e7db2e18cd1d3ea596a3f66fea687e218104763a1c507e3e78634413",
    "0ee74150128235917ae7507d8830d93f1c4cd57abadbf012b89df5ae7e6c64d7",
    "0afde9454d83255c48eacc14f6d9e06bd6300496937cb15c1d18ee0acaf1e68e",
    "2d19026e512ebe96223fc2728b865c7005df679d6873b4161e2ca76f03f46c46",
    "2718bc324aaff0095a4bc4e738284a7bf1f02f50810cf5ea90a4eabea5d5221b",
    "1ca115a9b7c129f03b9e78ec0ae3e5dd9fa145cd612ad31a99bf63492b3b7924",
    "121dfa7a128c662bbb8f52fb1f209431fc5fee713c80e34524d76cdf4504d788",
    "0910a0a9d6a45309c83a6519fa5f0bb13eb3c4aac0c86214ee94332ddc94f759",
    "25265982b1c81ecc2e1b306f788359c2e48dbbd5662d2108a41530d757dd1eec",
    "0518dcff994f014c8b0c944a32744311bc70b78d44919d1046e1aeb8c013b3f4",
    "071b6af934e451647871868961499f2e974420d34982f91c25f4a3d49d73165e",
    "0bcbbda89dc749608f3662e0d03b6b2894a88a6ff75029a131bd3f4c89f93d24",
    "0c23184192af62a3c7f8181d2db811ec1d5e9a3b599a86077ee925d833b316a8",
    "1f5f5da5d3115a89263dacd744ce199d53ee5d90cb0dc156fcf0abc3660880b0",
    "0fcbe878060a3d959d4dfbd87b632015de64345c996401bcf1a8649401bdbab3",
    "0ca0522fde90aecd54d865667bbd1bba015f16546406ac0d677d46466519a2a2",
    "2fc8b5ccff845b01de7f1b4eda7147d2314a16da7c1955dadd92d96b154e1841",
    "27942057345990458e685a2b55039a26340ca144b763909f71c1dc2dd90f1488",
    "21c05f447f10c1540e80256ee064540cf71c87ceccd9aa3ef94ca66e633fb2fe",
    "28d0c8c1b89b263851cef05c6c7b656073efad15db90b5fa04d62b421ac381e6",
    "1b02669038d338174f92af5517a7965089548928847e1f46da3e3555ac76c73c",
    "0558588cc33a5becddbb2d3061e02665fcad4cd77e689ce594a40277226bfb34",
    "13d01ce7ee16600a8ca98a2f593590eb19e0f0f960a60bdd5d4af9516eefb695",
    "1cd15d494c9290b37ebf70693208958327acd13a3779db8a1d5b7d070c46b6b1",
];

pub(crate) const INTERNAL_MATRIX_DIAGONAL: [&str; 4] = [
    "0c01c8b1ca4e2a238d8f10b74b57c81593124c8d7554b699e11b666f2e980fa2",
    "2d539ecc69daa109c94cecd5c9a5b7404b4631afa9fd50d0cba6b79b4141238c",
    "14938f1893fce7d223674b8f168863a7677074f7b47e1e65b720d1c4abcecc75",
    "237ad626c54327d0c5c0b145068479c316ec5affb716ab9f2ed3aa4b49cdd1cd",
];
